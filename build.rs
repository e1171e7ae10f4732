use std::process::Command;

/// Output of `git rev-parse <args>`, or "unknown" outside a git checkout.
fn git_rev_parse(args: &[&str]) -> String {
    Command::new("git")
        .arg("rev-parse")
        .args(args)
        .output()
        .ok()
        .filter(|output| output.status.success())
        .and_then(|output| String::from_utf8(output.stdout).ok())
        .map_or_else(|| "unknown".to_string(), |hash| hash.trim().to_string())
}

fn main() {
    println!("cargo:rustc-env=GIT_HASH={}", git_rev_parse(&["--short", "HEAD"]));
    println!("cargo:rustc-env=GIT_HASH_FULL={}", git_rev_parse(&["HEAD"]));
    println!("cargo:rerun-if-changed=.git/HEAD");
}
