#[macro_use]
extern crate bencher;

use bencher::{black_box, Bencher};

use weburl::Url;

fn short(bench: &mut Bencher) {
    let url = "https://example.com/bench";

    bench.bytes = url.len() as u64;
    bench.iter(|| black_box(url).parse::<Url>().unwrap());
}

fn long(bench: &mut Bencher) {
    let url = "https://example.com/parkbench?tre=es&st=uff";

    bench.bytes = url.len() as u64;
    bench.iter(|| black_box(url).parse::<Url>().unwrap());
}

fn fragment(bench: &mut Bencher) {
    let url = "https://example.com/parkbench?tre=es&st=uff#fragment";

    bench.bytes = url.len() as u64;
    bench.iter(|| black_box(url).parse::<Url>().unwrap());
}

fn plain(bench: &mut Bencher) {
    let url = "https://example.com/";

    bench.bytes = url.len() as u64;
    bench.iter(|| black_box(url).parse::<Url>().unwrap());
}

fn port(bench: &mut Bencher) {
    let url = "https://example.com:8080";

    bench.bytes = url.len() as u64;
    bench.iter(|| black_box(url).parse::<Url>().unwrap());
}

fn ipv6(bench: &mut Bencher) {
    let url = "https://[2001:db8::1]:8080/";

    bench.bytes = url.len() as u64;
    bench.iter(|| black_box(url).parse::<Url>().unwrap());
}

fn relative(bench: &mut Bencher) {
    let base = "https://example.com/a/b/c".parse::<Url>().unwrap();

    bench.iter(|| black_box(&base).join("../d?query=1").unwrap());
}

fn search_params(bench: &mut Bencher) {
    let url = "https://example.com/?a=1&b=2&c=3".parse::<Url>().unwrap();

    bench.iter(|| {
        let mut url = black_box(&url).clone();
        url.search_params_mut().append("d", "4");
        url.href()
    });
}

benchmark_group!(
    benches,
    short,
    long,
    fragment,
    plain,
    port,
    ipv6,
    relative,
    search_params
);
benchmark_main!(benches);
