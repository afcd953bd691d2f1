//! `pack-bench` — times JSON and CBOR encode/decode over a fixed payload.
//!
//! Usage:
//!   pack-bench [payload-path]
//!
//! The path defaults to `strawberry_pie.jpg` in the working directory.

use pack_bench::DEFAULT_PAYLOAD;

fn main() {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_PAYLOAD.to_owned());

    if let Err(e) = pack_bench::run(&path) {
        eprintln!("{e}");
        std::process::exit(1);
    }
}
