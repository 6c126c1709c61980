use codspeed_criterion_compat::{criterion_group, criterion_main, Criterion};
use urikit::{
    decode_base64, decode_url, encode_base64, encode_url, parse_uri, Charset, SchemeFamily,
};

fn http_uris() -> &'static [&'static str] {
    &[
        "http://www.example.com",
        "https://user:password@[::1]:8080/index.php?q1=a&q2=123#anchor",
        "www.example.com:443",
        "http://example.com/foo/bar/.././baz?q=1&r=2#toto",
        "http://a.example/AZaz\u{00C0}\u{00D6}\u{00D8}\u{00F6}\u{00F8}\u{02FF}\u{0370}",
    ]
}

fn data_uris() -> &'static [&'static str] {
    &[
        "data:,",
        "data:,A%20brief%20note",
        "data:application/json;charset=UTF-8,{\"message\": \"moin\"}",
        "data:image/gif;base64,R0lGODdhMAAwAPAAAAAAAP///ywAAAAAMAAwAAAC8IyPqcvt3wCcDkiLc7C0qwyGHhSWpjQu5yqmCYsapyuvUUlvONmOZtfzgFz",
    ]
}

fn parse_http(c: &mut Criterion) {
    c.bench_function("parse HTTP URIs", |b| {
        b.iter(|| {
            for uri in http_uris() {
                parse_uri(uri, SchemeFamily::Http).unwrap();
            }
        })
    });
}

fn parse_data(c: &mut Criterion) {
    c.bench_function("parse data URIs", |b| {
        b.iter(|| {
            for uri in data_uris() {
                parse_uri(uri, SchemeFamily::Data).unwrap();
            }
        })
    });
}

fn url_round_trip(c: &mut Criterion) {
    let text = "Hello world & goodbye = ünïcödé ✓ ".repeat(32);
    c.bench_function("URL round trip", |b| b.iter(|| decode_url(&encode_url(&text))));
}

fn base64_round_trip(c: &mut Criterion) {
    let text = "Hello world & goodbye = ünïcödé ✓ ".repeat(32);
    for charset in [Charset::Utf8, Charset::Utf16, Charset::Utf7] {
        c.bench_function(&format!("Base64 round trip in {charset}"), |b| {
            b.iter(|| {
                let encoded = encode_base64(text.as_str(), charset).unwrap();
                decode_base64(&encoded, charset).unwrap()
            })
        });
    }
}

criterion_group!(
    uri,
    parse_http,
    parse_data,
    url_round_trip,
    base64_round_trip
);

criterion_main!(uri);
