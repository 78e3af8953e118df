#[test]
fn clean() {
    trycmd::TestCases::new()
        .case("tests/clean/*.toml")
        .env("LINTRACE_ALLOW_STDIN", "true")
        .default_bin_name("lintrace");
}

#[test]
fn cosim() {
    trycmd::TestCases::new()
        .case("tests/cosim/*.toml")
        .env("LINTRACE_ALLOW_STDIN", "true")
        .default_bin_name("lintrace");
}

#[test]
fn stat() {
    trycmd::TestCases::new()
        .case("tests/stat/*.toml")
        .env("LINTRACE_ALLOW_STDIN", "true")
        .default_bin_name("lintrace");
}
