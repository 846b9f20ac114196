use reqwest::blocking::Client;
use reqwest::Url;
use ssestream::reqwest::connect;

fn main() {
    let url = std::env::args().nth(1).unwrap_or_else(|| "http://localhost:8080/events".into());
    let decoder = connect(&Client::new(), Url::parse(&url).unwrap()).unwrap();
    for event in decoder {
        println!("{}", event.unwrap());
    }
}
