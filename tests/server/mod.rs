use std::io::{BufRead, BufReader, Write};
use std::net::{SocketAddr, TcpListener};
use std::thread::{self, JoinHandle};

/// A one-shot HTTP server: accepts a single connection, records the request head, writes a
/// canned response and hangs up.
pub struct Server {
    addr: SocketAddr,
    handle: Option<JoinHandle<Vec<String>>>,
}

impl Server {
    pub fn send(response: &'static str) -> Server {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut request = Vec::new();
            {
                let mut reader = BufReader::new(&stream);
                loop {
                    let mut line = String::new();
                    if reader.read_line(&mut line).unwrap() == 0 || line == "\r\n" {
                        break;
                    }
                    request.push(line.trim_end().to_string());
                }
            }
            stream.write_all(response.as_bytes()).unwrap();
            request
        });
        Server { addr, handle: Some(handle) }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Waits for the connection to finish and returns the request lines, lowercased.
    pub fn request(mut self) -> Vec<String> {
        let handle = self.handle.take().unwrap();
        handle.join().unwrap().into_iter().map(|line| line.to_lowercase()).collect()
    }
}
