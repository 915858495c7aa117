pub fn print_version_info() {
    println!("xspd {}", env!("CARGO_PKG_VERSION"));
    println!("build commit: {}", include_str!(concat!(env!("OUT_DIR"), "/git-commit")));
    println!("build date: {}", include_str!(concat!(env!("OUT_DIR"), "/compile-date")));
}
