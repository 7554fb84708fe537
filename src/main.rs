//! Host-side helper: `cargo run` builds the wasm bundle into `static/pkg` and
//! serves `static/` locally so the page effects can be checked in a browser.
//!
//! `PORT` overrides the default port 8000.

use std::env;
use std::process::{exit, Command, Stdio};

fn main() {
    // Only meaningful on non-wasm targets.
    if cfg!(target_arch = "wasm32") {
        return;
    }

    let port = env::var("PORT").unwrap_or_else(|_| "8000".into());

    println!("Building wasm bundle …");
    match Command::new("wasm-pack")
        .args(["build", "--release", "--target", "web", "--out-dir", "static/pkg"])
        .status()
    {
        Ok(st) if st.success() => {}
        Ok(_) => {
            eprintln!("wasm-pack build failed");
            exit(1);
        }
        Err(_) => {
            eprintln!("wasm-pack not found in PATH (https://rustwasm.github.io/wasm-pack/); serving existing static/pkg.");
        }
    }

    println!("Serving static/ at http://127.0.0.1:{port} (Ctrl-C to stop)");
    let status = Command::new("python3")
        .args(["-m", "http.server", port.as_str(), "--directory", "static"])
        .stdout(Stdio::null())
        .status();
    match status {
        Ok(st) if st.success() => {}
        Ok(st) => {
            eprintln!("http server exited with {st}");
            exit(1);
        }
        Err(e) => {
            eprintln!("failed to start http server: {e}");
            exit(1);
        }
    }
}
