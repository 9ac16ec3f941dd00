use std::path::PathBuf;

/// Value of `--name=value`, blank values count as absent.
fn flag_value(args: &[String], name: &str) -> Option<String> {
    let prefix = format!("{}=", name);
    args.iter()
        .find_map(|a| a.strip_prefix(prefix.as_str()))
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn main() {
    let args: Vec<String> = std::env::args().collect();

    let options = travel_intake::LaunchOptions {
        url: flag_value(&args, "--url"),
        config_path: flag_value(&args, "--config").map(PathBuf::from),
        lang: flag_value(&args, "--lang"),
    };

    // Print the effective settings (secrets omitted) and exit.
    if args.iter().any(|a| a == "--print-config") {
        travel_intake::print_config(options);
        return;
    }

    // Non-interactive TUI smoke test mode (for automated checks).
    // Renders a single frame for a specific step and exits 0.
    // Usage: --tui-smoke or --tui-smoke=identity|travel|health|vaccination|referral|summary|denied
    if let Some(arg) = args
        .iter()
        .find(|a| a.as_str() == "--tui-smoke" || a.starts_with("--tui-smoke="))
    {
        let target = arg
            .split_once('=')
            .map(|(_, v)| v.to_string())
            .filter(|v| !v.trim().is_empty());
        travel_intake::run_tui_smoke(options, target);
        return;
    }

    // Interactive wizard. `--url=<entry url>` carries the invite (`token`) or resume (`edit`) parameter.
    travel_intake::run_tui(options);
}
