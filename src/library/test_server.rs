use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread;

/// Answers exactly one HTTP request on a loopback port with a canned
/// response, then closes. Returns the base URL, e.g. `http://127.0.0.1:4242`.
pub fn serve_once(status: &str, content_type: &str, body: Vec<u8>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let address = listener.local_addr().unwrap();

    let mut response = format!(
        "HTTP/1.1 {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        status,
        content_type,
        body.len()
    )
    .into_bytes();
    response.extend(body);

    thread::spawn(move || {
        let Ok((mut stream, _)) = listener.accept() else {
            return;
        };

        // read the whole request head before answering
        let mut request = Vec::new();
        let mut buffer = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            match stream.read(&mut buffer) {
                Ok(0) | Err(_) => break,
                Ok(n) => request.extend_from_slice(&buffer[..n]),
            }
        }

        let _ = stream.write_all(&response);
        let _ = stream.flush();
    });

    format!("http://{}", address)
}
