//! HTTP client builtins

use std::time::Duration;

use super::define;
use crate::environment::Environment;
use crate::expr::{Arity, Expr};

const TIMEOUT: Duration = Duration::from_secs(30);

pub(super) fn register(env: &Environment) {
    define(env, "fetch", Arity::Exactly(1), |args| {
        let url = args[0].as_str().ok_or("url must be a string")?;
        fetch(url).map(Expr::string)
    });
}

/// GET `url` and return the body. Any status other than `200` fails.
fn fetch(url: &str) -> Result<String, String> {
    let agent = ureq::AgentBuilder::new().timeout(TIMEOUT).build();
    let response = match agent.get(url).call() {
        Ok(response) => response,
        Err(ureq::Error::Status(_, response)) => response,
        Err(err) => return Err(format!("HTTP error: {}", err)),
    };

    let status = response.status();
    tracing::debug!(url, status, "fetch");
    if status != 200 {
        return Err(format!(
            "HTTP {}: {} {}",
            status,
            status,
            response.status_text()
        ));
    }

    response
        .into_string()
        .map_err(|err| format!("error reading response: {}", err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eval::eval_str;
    use crate::EvalContext;
    use pretty_assertions::assert_eq;
    use std::io::{BufRead, BufReader, Write};
    use std::net::TcpListener;
    use std::thread;

    /// Answer a single request with `status` and `body`; returns the URL.
    fn serve_once(status: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}/", listener.local_addr().unwrap());
        thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream.try_clone().unwrap());
            loop {
                let mut line = String::new();
                if reader.read_line(&mut line).unwrap() == 0 || line == "\r\n" {
                    break;
                }
            }
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            stream.write_all(response.as_bytes()).unwrap();
        });
        url
    }

    #[test]
    fn test_fetch_returns_body() {
        let url = serve_once("200 OK", "Hello from test server");
        assert_eq!(fetch(&url).unwrap(), "Hello from test server");
    }

    #[test]
    fn test_fetch_non_200_fails() {
        let url = serve_once("404 Not Found", "Not Found");
        assert_eq!(fetch(&url).unwrap_err(), "HTTP 404: 404 Not Found");
    }

    #[test]
    fn test_fetch_connection_refused() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}/", listener.local_addr().unwrap());
        drop(listener);
        assert!(fetch(&url).unwrap_err().starts_with("HTTP error:"));
    }

    #[test]
    fn test_fetch_json_through_evaluator() {
        let url = serve_once("200 OK", r#"{"name":"Alice","age":30}"#);
        let env = Environment::with_builtins().unwrap();
        let ctx = EvalContext::new();
        let src = format!(r#"(hash-get (json-decode (fetch "{}")) "name")"#, url);
        assert_eq!(eval_str(&src, &env, &ctx).unwrap(), Expr::string("Alice"));
    }

    #[test]
    fn test_fetch_requires_string_url() {
        let env = Environment::with_builtins().unwrap();
        let err = eval_str("(fetch 42)", &env, &EvalContext::new()).unwrap_err();
        assert_eq!(err.to_string(), "fetch: url must be a string");
    }
}
