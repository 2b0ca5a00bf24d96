//! Build script for nexus-firmware
//!
//! - Validates board.toml and compiles it into `board_config()`
//! - Links the HALCoGen driver library and linker script for target builds

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use nexus_core::config::BoardConfig;

/// Directory holding the HALCoGen-generated project build output
const HALCOGEN_DIR: &str = "halcogen";

/// Archive built from the HALCoGen sources (`libhalcogen.a`)
const HALCOGEN_LIB: &str = "halcogen";

/// GCC linker script exported by HALCoGen
const HALCOGEN_LINKER_SCRIPT: &str = "HL_sys_link.ld";

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    let config = load_board_config();
    generate_board_config(&config);
    setup_linker();
}

/// Read, parse and validate board.toml
fn load_board_config() -> BoardConfig {
    println!("cargo:rerun-if-changed=board.toml");

    let config_path = Path::new("board.toml");

    if !config_path.exists() {
        fail(
            "board.toml not found!",
            &[
                "The firmware requires a board.toml configuration file.",
                "Please create one in the nexus-firmware directory.",
            ],
        );
    }

    let content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => fail("Failed to read board.toml", &[&format!("Error: {}", e)]),
    };

    let config: BoardConfig = match toml::from_str(&content) {
        Ok(config) => config,
        Err(e) => {
            let msg = e.to_string();
            let lines: Vec<&str> = msg.lines().collect();
            fail("Invalid board.toml", &lines)
        }
    };

    if let Err(e) = config.validate() {
        fail("Invalid value in board.toml", &[&e.to_string()]);
    }

    println!("cargo:warning=board.toml validated successfully");
    config
}

/// Write `board_config()` into OUT_DIR/board_config.rs
fn generate_board_config(config: &BoardConfig) {
    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR is set by cargo"));

    let source = format!(
        "/// Board configuration compiled from board.toml\n\
         pub fn board_config() -> BoardConfig {{\n\
         \x20   let mut banner = String::new();\n\
         \x20   // Length checked against MAX_BANNER_LEN by build.rs\n\
         \x20   let _ = banner.push_str({banner:?});\n\
         \x20   BoardConfig {{\n\
         \x20       led: LedConfig {{\n\
         \x20           port: Port::{port:?},\n\
         \x20           pin: Pin::{pin:?},\n\
         \x20       }},\n\
         \x20       console: ConsoleConfig {{\n\
         \x20           uart: UartInstance::{uart:?},\n\
         \x20           baudrate: {baudrate},\n\
         \x20           banner,\n\
         \x20       }},\n\
         \x20       blink: BlinkConfig {{\n\
         \x20           half_period_ms: {half_period_ms},\n\
         \x20       }},\n\
         \x20   }}\n\
         }}\n",
        banner = config.console.banner.as_str(),
        port = config.led.port,
        pin = config.led.pin,
        uart = config.console.uart,
        baudrate = config.console.baudrate,
        half_period_ms = config.blink.half_period_ms,
    );

    fs::write(out_dir.join("board_config.rs"), source).expect("write board_config.rs");
}

/// Link against the HALCoGen library when building for the target
fn setup_linker() {
    let target = env::var("TARGET").unwrap_or_default();
    if !target.starts_with("armebv7r") {
        return;
    }

    let dir = Path::new(HALCOGEN_DIR);
    println!("cargo:rerun-if-changed={}", HALCOGEN_DIR);

    let archive = dir.join(format!("lib{}.a", HALCOGEN_LIB));
    let script = dir.join(HALCOGEN_LINKER_SCRIPT);
    for required in [&archive, &script] {
        if !required.exists() {
            fail(
                "HALCoGen build output missing",
                &[
                    &format!("Expected {}", required.display()),
                    "Generate the TMS570LC4357 project with HALCoGen and",
                    "build its sources into a static library first.",
                ],
            );
        }
    }

    let dir = dir
        .canonicalize()
        .unwrap_or_else(|_| dir.to_path_buf());
    println!("cargo:rustc-link-search={}", dir.display());
    println!("cargo:rustc-link-lib=static={}", HALCOGEN_LIB);
    println!("cargo:rustc-link-arg=-T{}", HALCOGEN_LINKER_SCRIPT);
    // defmt-rtt needs the defmt sections placed by this script
    println!("cargo:rustc-link-arg=-Tdefmt.x");
}

/// Abort the build with a framed error message
fn fail(title: &str, lines: &[&str]) -> ! {
    let body = lines
        .iter()
        .map(|line| format!("║  {:<63} ║", truncate(line)))
        .collect::<Vec<_>>()
        .join("\n");
    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<57}║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title, body
    );
}

fn truncate(line: &str) -> String {
    if line.chars().count() > 63 {
        let head: String = line.chars().take(60).collect();
        format!("{}...", head)
    } else {
        line.to_string()
    }
}
