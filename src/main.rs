//! Entry point for the oakmon TUI. Parses args, resolves the device
//! profile, and runs the App.

use std::env;
use std::io::{self, Write};
use std::time::Duration;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use oakmon::app::App;
use oakmon::device::DeviceClient;
use oakmon::poller::DEFAULT_POLL_INTERVAL;
use oakmon::profiles::{
    load_profiles, save_profiles, ProfileEntry, ProfileRequest, ResolveProfile,
};

struct ParsedArgs {
    url: Option<String>,
    profile: Option<String>,
    interval_ms: Option<u64>,
    save: bool,
    dry_run: bool,
}

fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<ParsedArgs, String> {
    let mut it = args.into_iter();
    let prog = it.next().unwrap_or_else(|| "oakmon".into());
    let usage = format!(
        "Usage: {prog} [--interval MS|-i MS] [--profile NAME|-P NAME] [--save] [--dry-run] [http://HOST[:PORT]]"
    );
    let mut url: Option<String> = None;
    let mut profile: Option<String> = None;
    let mut interval_ms: Option<u64> = None;
    let mut save = false; // --save
    let mut dry_run = false; // resolve + persist, skip connecting

    let parse_ms = |v: &str| {
        v.parse::<u64>()
            .map_err(|_| format!("--interval expects milliseconds, got '{v}'"))
    };

    while let Some(arg) = it.next() {
        match arg.as_str() {
            "-h" | "--help" => return Err(usage),
            "--interval" | "-i" => match it.next() {
                Some(v) => interval_ms = Some(parse_ms(&v)?),
                None => return Err(usage),
            },
            "--profile" | "-P" => {
                profile = it.next();
            }
            "--save" => {
                save = true;
            }
            "--dry-run" => {
                dry_run = true;
            }
            _ if arg.starts_with("--interval=") => {
                if let Some((_, v)) = arg.split_once('=') {
                    if !v.is_empty() {
                        interval_ms = Some(parse_ms(v)?);
                    }
                }
            }
            _ if arg.starts_with("--profile=") => {
                if let Some((_, v)) = arg.split_once('=') {
                    if !v.is_empty() {
                        profile = Some(v.to_string());
                    }
                }
            }
            _ => {
                if url.is_none() {
                    url = Some(arg);
                } else {
                    return Err(format!("Unexpected argument. {usage}"));
                }
            }
        }
    }
    Ok(ParsedArgs {
        url,
        profile,
        interval_ms,
        save,
        dry_run,
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let parsed = match parse_args(env::args()) {
        Ok(v) => v,
        Err(msg) => {
            eprintln!("{msg}");
            return Ok(());
        }
    };

    let profiles_file = load_profiles();
    let req = ProfileRequest {
        profile_name: parsed.profile.clone(),
        url: parsed.url.clone(),
        interval_ms: parsed.interval_ms,
    };
    let resolved = req.resolve(&profiles_file);

    // Determine the final device entry (and maybe mutated profiles to persist)
    let mut profiles_mut = profiles_file.clone();
    let entry: ProfileEntry = match resolved {
        ResolveProfile::Direct(entry) => {
            if let Some(name) = parsed.profile.as_ref() {
                match profiles_mut.profiles.get(name) {
                    None => {
                        // New profile: auto-save immediately
                        profiles_mut.profiles.insert(name.clone(), entry.clone());
                        let _ = save_profiles(&profiles_mut);
                    }
                    Some(existing) => {
                        if existing != &entry {
                            let overwrite = if parsed.save {
                                true
                            } else {
                                prompt_yes_no(&format!(
                                    "Overwrite existing profile '{name}'? [y/N]: "
                                ))
                            };
                            if overwrite {
                                profiles_mut.profiles.insert(name.clone(), entry.clone());
                                let _ = save_profiles(&profiles_mut);
                            }
                        }
                    }
                }
            }
            entry
        }
        ResolveProfile::Loaded(entry) => entry,
        ResolveProfile::PromptSelect(names) => {
            eprintln!("Select device profile:");
            for (i, n) in names.iter().enumerate() {
                eprintln!("  {}. {}", i + 1, n);
            }
            eprint!("Enter number (or blank to abort): ");
            let _ = io::stderr().flush();
            let mut line = String::new();
            if io::stdin().read_line(&mut line).is_err() {
                return Ok(());
            }
            let Ok(idx) = line.trim().parse::<usize>() else {
                return Ok(());
            };
            if idx < 1 || idx > names.len() {
                return Ok(());
            }
            match profiles_mut.profiles.get(&names[idx - 1]) {
                Some(entry) => entry.clone(),
                None => return Ok(()),
            }
        }
        ResolveProfile::PromptCreate(name) => {
            eprintln!("Profile '{name}' does not exist yet.");
            let url = prompt_string("Enter device URL (http://HOST[:PORT]): ")?;
            if url.trim().is_empty() {
                return Ok(());
            }
            let entry = ProfileEntry {
                url: url.trim().to_string(),
                interval_ms: parsed.interval_ms,
            };
            profiles_mut.profiles.insert(name.clone(), entry.clone());
            let _ = save_profiles(&profiles_mut);
            entry
        }
        ResolveProfile::None => {
            eprintln!("No device URL provided and no profiles to select.");
            return Ok(());
        }
    };

    // CLI interval beats the profile's stored one; both beat the default
    let interval = Duration::from_millis(
        parsed
            .interval_ms
            .or(entry.interval_ms)
            .unwrap_or(DEFAULT_POLL_INTERVAL.as_millis() as u64),
    );

    let client = DeviceClient::new(&entry.url)?;

    if parsed.dry_run {
        eprintln!(
            "Resolved device {} (poll every {} ms)",
            client.base_url(),
            interval.as_millis()
        );
        return Ok(());
    }

    let mut app = App::new(client, interval);
    app.run().await
}

fn prompt_yes_no(prompt: &str) -> bool {
    eprint!("{prompt}");
    let _ = io::stderr().flush();
    let mut line = String::new();
    if io::stdin().read_line(&mut line).is_ok() {
        matches!(line.trim().to_ascii_lowercase().as_str(), "y" | "yes")
    } else {
        false
    }
}

fn prompt_string(prompt: &str) -> io::Result<String> {
    eprint!("{prompt}");
    let _ = io::stderr().flush();
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line)
}
