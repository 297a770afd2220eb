use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use serde::Serialize;
use subsai_config::{advanced_tools, available_models, basic_tools, ToolConfig};
use subsai_hwprof::{
    detect::util::hwprof_debug, detect_hardware, get_available_devices, host_summary,
    select_faster_whisper_runtime, HardwareProfile, HostSummary, AUTO_DEVICE, DEFAULT_COMPUTE_TYPE,
};

/// Exit code for a runtime that cannot be resolved on this host.
const EXIT_CONFIGURATION: u8 = 2;

#[derive(Debug, Parser)]
#[command(
    name = "subsai-runtime-check",
    version,
    about = "Inspect detected hardware and the faster-whisper runtime subsai would use."
)]
struct Cli {
    /// Print JSON instead of text.
    #[arg(long, global = true)]
    json: bool,

    /// Log probe diagnostics to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Host summary and hardware profile.
    Profile,
    /// Devices usable by the translation backend.
    Devices,
    /// Resolve faster-whisper device and compute type.
    Resolve {
        #[arg(long, default_value = AUTO_DEVICE)]
        device: String,
        #[arg(long, default_value = DEFAULT_COMPUTE_TYPE)]
        compute_type: String,
    },
    /// Registered models and tool configuration.
    Tools,
}

#[derive(Serialize)]
struct ProfileReport {
    host: HostSummary,
    hardware: HardwareProfile,
}

#[derive(Serialize)]
struct ToolsReport {
    models: Vec<String>,
    basic: Vec<ToolConfig>,
    advanced: Vec<ToolConfig>,
}

fn init_logging(verbose: bool) {
    let level = if verbose || hwprof_debug() { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

/// "os: <name> <version>", e.g. "os: Debian GNU/Linux 12".
fn os_line(h: &HostSummary) -> String {
    match h.os_version.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
        Some(v) if v.starts_with(h.os.as_str()) => format!("os: {v}"),
        Some(v) => format!("os: {} {v}", h.os),
        None => format!("os: {}", h.os),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    log::debug!("command: {:?}", cli.command);

    match cli.command {
        Command::Profile => {
            let report = ProfileReport {
                host: host_summary(),
                hardware: detect_hardware(),
            };
            if cli.json {
                print_json(&report)?;
            } else {
                let h = &report.host;
                let hw = &report.hardware;
                println!("{}", os_line(h));
                println!("machine: {}", h.machine);
                println!(
                    "cpu: {} ({} threads, {} cores)",
                    h.cpu_brand,
                    h.logical_cpus,
                    h.physical_cores
                        .map(|c| c.to_string())
                        .unwrap_or_else(|| "?".into())
                );
                if let Some(cuda) = &h.cuda_driver {
                    println!("cuda_driver: {cuda}");
                }
                println!("system: {}", hw.system);
                println!("has_mps: {}", hw.has_mps);
                println!("has_cuda: {}", hw.has_cuda);
                println!("intel_gpu_detected: {}", hw.intel_gpu_detected);
            }
        }
        Command::Devices => {
            let devices = get_available_devices();
            if cli.json {
                print_json(&devices)?;
            } else {
                for d in &devices {
                    println!("{d}");
                }
            }
        }
        Command::Resolve {
            device,
            compute_type,
        } => match select_faster_whisper_runtime(&device, &compute_type) {
            Ok(decision) => {
                if cli.json {
                    print_json(&decision)?;
                } else {
                    println!("device: {}", decision.device);
                    println!("compute_type: {}", decision.compute_type);
                    println!("reason: {}", decision.reason);
                }
            }
            Err(e) => {
                log::debug!("runtime resolution failed: {e:?}");
                eprintln!("{e}");
                return Ok(ExitCode::from(EXIT_CONFIGURATION));
            }
        },
        Command::Tools => {
            let devices = get_available_devices();
            let report = ToolsReport {
                models: available_models()?.into_iter().map(|m| m.id).collect(),
                basic: basic_tools(),
                advanced: advanced_tools(&devices),
            };
            if cli.json {
                print_json(&report)?;
            } else {
                println!("models: {}", report.models.join(", "));
                for tool in report.basic.iter().chain(report.advanced.iter()) {
                    let keys: Vec<&str> = tool
                        .config_schema
                        .fields()
                        .iter()
                        .map(|f| f.key.as_str())
                        .collect();
                    println!("{}: {}", tool.name, keys.join(", "));
                }
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    fn summary(os: &str, version: Option<&str>) -> HostSummary {
        HostSummary {
            os: os.into(),
            os_version: version.map(Into::into),
            machine: "x86_64".into(),
            cpu_brand: "Test CPU".into(),
            logical_cpus: 4,
            physical_cores: Some(2),
            cuda_driver: None,
        }
    }

    #[test]
    fn os_line_does_not_repeat_the_name() {
        assert_eq!(os_line(&summary("Debian GNU/Linux", Some("12"))), "os: Debian GNU/Linux 12");
        assert_eq!(
            os_line(&summary("Debian GNU/Linux", Some("Debian GNU/Linux 12"))),
            "os: Debian GNU/Linux 12"
        );
        assert_eq!(os_line(&summary("Darwin", None)), "os: Darwin");
        assert_eq!(os_line(&summary("Darwin", Some(" "))), "os: Darwin");
    }

    #[test]
    fn resolve_defaults_to_auto() {
        let cli = Cli::try_parse_from(["subsai-runtime-check", "resolve"]).unwrap();
        match cli.command {
            Command::Resolve {
                device,
                compute_type,
            } => {
                assert_eq!(device, "auto");
                assert_eq!(compute_type, "default");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "subsai-runtime-check",
            "resolve",
            "--device",
            "cpu",
            "--compute-type",
            "int8",
            "--json",
        ])
        .unwrap();
        assert!(cli.json);
        assert!(matches!(
            cli.command,
            Command::Resolve { ref device, ref compute_type } if device == "cpu" && compute_type == "int8"
        ));
    }
}
