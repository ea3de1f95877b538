//! Stamps the binary with build date, time and commit for the startup banner.

use std::process::Command;

fn capture(program: &str, args: &[&str]) -> Option<String> {
    let output = Command::new(program).args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let text = String::from_utf8_lossy(&output.stdout).trim().to_string();
    (!text.is_empty()).then_some(text)
}

fn main() {
    let stamps = [
        ("BUILD_DATE", capture("date", &["+%Y-%m-%d"])),
        ("BUILD_TIME", capture("date", &["+%H:%M:%S"])),
        ("GIT_HASH", capture("git", &["rev-parse", "--short", "HEAD"])),
    ];
    for (key, value) in stamps {
        println!(
            "cargo:rustc-env={}={}",
            key,
            value.as_deref().unwrap_or("unknown")
        );
    }
    println!("cargo:rerun-if-changed=.git/HEAD");
}
