use crate::server::load_config;
use std::path::Path;

pub async fn run() -> anyhow::Result<()> {
    println!("🏥 Leadscout Doctor\n");

    let mut all_ok = true;

    check_env_file();
    all_ok &= check_key("LINKUP_API_KEY", "search");
    all_ok &= check_key("OPENAI_API_KEY", "text generation");
    all_ok &= check_config();

    println!();
    if all_ok {
        println!("✅ All checks passed! Ready to run Leadscout.");
    } else {
        println!("⚠️  Some checks failed. Please fix the issues above.");
        std::process::exit(1);
    }

    Ok(())
}

fn check_env_file() {
    print!("Checking .env file... ");
    if Path::new(".env").exists() {
        println!("✅ Found");
    } else {
        println!("⚠️  Not found (environment variables only)");
    }
}

fn is_set(value: Option<String>) -> bool {
    value.is_some_and(|v| !v.trim().is_empty() && !v.contains("your"))
}

fn check_key(name: &str, purpose: &str) -> bool {
    print!("Checking {name} ({purpose})... ");
    if is_set(std::env::var(name).ok()) {
        println!("✅ Configured");
        true
    } else {
        println!("❌ Missing. Set it in the environment or .env file.");
        false
    }
}

fn check_config() -> bool {
    print!("Checking configuration... ");
    match load_config() {
        Ok(config) => {
            println!(
                "✅ server {}:{}, model {}, live cap {}, static cap {}",
                config.server.host,
                config.server.port,
                config.llm.model,
                config.pipeline.live_roster_cap,
                config.pipeline.static_roster_cap
            );
            true
        }
        Err(e) => {
            println!("❌ {e:#}");
            false
        }
    }
}
