//! Prints the parts of the URI given on the command line.
//!
//! ```sh
//! cargo run --example parse -- --family data 'data:text/plain;base64,bW9pbg=='
//! ```

use clap::{Arg, Command};
use std::process::ExitCode;
use urikit::{parse_uri, SchemeFamily, UriParts};

fn main() -> ExitCode {
    let matches = Command::new("parse")
        .about("Extracts the parts of an HTTP or data URI")
        .arg(
            Arg::new("family")
                .long("family")
                .short('f')
                .value_parser(["http", "data"])
                .default_value("http"),
        )
        .arg(Arg::new("uri").required(true))
        .get_matches();

    let family = matches
        .get_one::<String>("family")
        .and_then(|f| f.parse::<SchemeFamily>().ok())
        .unwrap_or_default();
    let Some(uri) = matches.get_one::<String>("uri") else {
        return ExitCode::FAILURE;
    };

    match parse_uri(uri, family) {
        Ok(UriParts::Http(parts)) => {
            println!("scheme:   {}", parts.scheme());
            println!("user:     {}", parts.user());
            println!("password: {}", parts.password());
            println!("host:     {}", parts.host());
            println!("port:     {}", parts.port());
            println!("path:     {}", parts.path());
            for (key, value) in parts.query() {
                println!("query:    {key} = {value}");
            }
            println!("fragment: {}", parts.fragment());
            ExitCode::SUCCESS
        }
        Ok(UriParts::Data(parts)) => {
            println!("scheme:    {}", parts.scheme());
            println!("mime type: {}", parts.mime_type());
            for (key, value) in parts.parameters() {
                println!("parameter: {key} = {value}");
            }
            println!("base64:    {}", parts.base64());
            println!("data:      {}", parts.data());
            match parts.decode_text() {
                Ok(text) => println!("decoded:   {text}"),
                Err(error) => println!("decoded:   <{error}>"),
            }
            ExitCode::SUCCESS
        }
        Err(error) => {
            eprintln!("{error}");
            ExitCode::FAILURE
        }
    }
}
