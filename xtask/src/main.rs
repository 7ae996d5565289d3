#![deny(unused_must_use)]

use std::{env, path::PathBuf};

use xshell::cmd;

/// Embedded target used to check the `no_std` build.
const EMBEDDED_TARGET: &str = "thumbv7em-none-eabihf";

fn main() -> Result<(), anyhow::Error> {
    let args = env::args().skip(1).collect::<Vec<_>>();
    let args = args.iter().map(|s| &**s).collect::<Vec<_>>();

    match &args[..] {
        ["ci"] => test_ci(),
        ["test"] => test_host(),
        ["check"] => check_embedded(),
        ["update"] => update(),
        _ => {
            println!("USAGE cargo xtask [ci|test|check|update]");
            Ok(())
        }
    }
}

fn update() -> Result<(), anyhow::Error> {
    let _p = xshell::pushd(root_dir())?;
    cmd!("cargo update").run()?;
    Ok(())
}

fn test_ci() -> Result<(), anyhow::Error> {
    let _e = xshell::pushenv("CI", "true");
    test_host()?;
    check_embedded()?;
    Ok(())
}

fn test_host() -> Result<(), anyhow::Error> {
    let _p = xshell::pushd(crate_dir())?;
    cmd!("cargo test").run()?;
    cmd!("cargo test --no-default-features --features std").run()?;
    Ok(())
}

fn check_embedded() -> Result<(), anyhow::Error> {
    let _p = xshell::pushd(crate_dir())?;
    let target = EMBEDDED_TARGET;
    cmd!("cargo check --target {target} --no-default-features").run()?;
    for features in ["log", "defmt"] {
        println!("Checking {} with feature '{}'", target, features);
        cmd!("cargo check --target {target} --no-default-features --features {features}").run()?;
    }
    Ok(())
}

fn crate_dir() -> PathBuf {
    let mut dir = root_dir();
    dir.push("tempsensor");
    dir
}

fn root_dir() -> PathBuf {
    let mut xtask_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    xtask_dir.pop();
    xtask_dir
}
