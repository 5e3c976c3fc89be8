// Entry point and interactive dashboard flow.
//
// Startup loads and cleans the weather CSV once; a missing or unusable file
// is fatal. The main loop then dispatches on session state:
// - Signed-out visitors get the login/register menu.
// - Signed-in users get the dashboard for the selected country (preview,
//   summary statistics, climate risk, insight text, monthly trends and
//   extreme days) plus unit, timer, download and logout controls.
mod auth;
mod error;
mod insight;
mod loader;
mod metrics;
mod output;
mod session;
mod types;
mod util;

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use auth::RegistrationForm;
use loader::Dataset;
use session::{RefreshInterval, Session};
use types::TempUnit;

/// Interactive climate analytics dashboard over a static weather dataset.
#[derive(Parser, Debug)]
#[command(name = "climatescope", version, about)]
struct Args {
    /// Path to the weather CSV file.
    #[arg(long, default_value = "GlobalWeatherRepository.csv")]
    data: PathBuf,
}

/// Presentation choices for the signed-in user. Owned by the controller
/// loop rather than the session, so logging out returns both to defaults.
struct ViewState {
    country: String,
    unit: TempUnit,
}

impl ViewState {
    fn new(data: &Dataset) -> ViewState {
        ViewState {
            country: data.countries.first().cloned().unwrap_or_default(),
            unit: TempUnit::Celsius,
        }
    }
}

fn main() {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let data = match loader::dataset(&args.data) {
        Ok(data) => data,
        Err(e) => {
            tracing::error!(error = %e, "startup load failed");
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };
    print_load_summary(data);

    let mut session = Session::new();
    loop {
        if session.is_authenticated() {
            let mut view = ViewState::new(data);
            while session.is_authenticated() {
                if !dashboard_cycle(&mut session, &mut view, data) {
                    println!("Exiting the program.");
                    return;
                }
            }
        } else if !auth_cycle(&mut session) {
            println!("Exiting the program.");
            return;
        }
    }
}

fn print_load_summary(data: &Dataset) {
    let report = data.report;
    println!(
        "Processing dataset... ({} of {} rows loaded across {} countries)",
        util::format_int(report.loaded_rows as i64),
        util::format_int(report.total_rows as i64),
        util::format_int(data.countries.len() as i64)
    );
    if report.skipped_rows > 0 {
        println!(
            "Note: {} rows skipped due to parse/validation errors.",
            util::format_int(report.skipped_rows as i64)
        );
    }
    if report.missing_timestamps > 0 {
        println!(
            "Info: {} rows have no usable timestamp and are excluded from monthly trends.",
            util::format_int(report.missing_timestamps as i64)
        );
    }
    println!("");
}

/// Read a single line of input after printing `label`.
///
/// End of input exits cleanly instead of spinning on the menu.
fn prompt(label: &str) -> String {
    print!("{}", label);
    let _ = io::stdout().flush();
    let mut buf = String::new();
    match io::stdin().read_line(&mut buf) {
        Ok(0) | Err(_) => {
            println!("");
            process::exit(0);
        }
        Ok(_) => buf.trim().to_string(),
    }
}

fn read_choice() -> String {
    prompt("Enter choice: ")
}

fn prompt_yes_no(label: &str) -> bool {
    loop {
        match prompt(label).to_uppercase().as_str() {
            "Y" => return true,
            "N" => return false,
            _ => println!("Invalid choice. Please enter Y or N."),
        }
    }
}

/// One pass through the signed-out menu. Returns `false` when the user
/// chose to exit.
fn auth_cycle(session: &mut Session) -> bool {
    println!("=== ClimateScope ===");
    println!("[1] Login");
    println!("[2] Register");
    println!("[3] Exit\n");
    match read_choice().as_str() {
        "1" => {
            handle_login(session);
            true
        }
        "2" => {
            handle_register(session);
            true
        }
        "3" => false,
        _ => {
            println!("Invalid choice. Please enter 1, 2 or 3.\n");
            true
        }
    }
}

fn handle_login(session: &mut Session) {
    let username = prompt("Username: ");
    let password = prompt("Password: ");
    match auth::login(session, &username, &password) {
        Ok(()) => println!("Login successful! Welcome, {}.\n", username),
        Err(e) => println!("{}\n", e),
    }
}

fn handle_register(session: &mut Session) {
    let form = RegistrationForm {
        username: prompt("New username: "),
        email: prompt("Email: "),
        password: prompt("New password: "),
        confirm: prompt("Confirm password: "),
    };
    match auth::register(session, &form) {
        Ok(()) => println!("Registration successful! You can log in now.\n"),
        Err(e) => println!("{}\n", e),
    }
}

/// One render-and-dispatch pass of the dashboard. Returns `false` when the
/// user chose to exit the program.
fn dashboard_cycle(session: &mut Session, view: &mut ViewState, data: &Dataset) -> bool {
    session.advance_rotation();
    render_dashboard(session, view, data);

    println!("[1] Select country");
    println!("[2] Switch unit to {}", view.unit.toggled().name());
    println!("[3] Auto refresh settings");
    println!("[4] Refresh dashboard");
    println!("[5] Download country CSV");
    println!("[6] Logout");
    println!("[7] Exit\n");
    match read_choice().as_str() {
        "1" => handle_select_country(view, data),
        "2" => {
            view.unit = view.unit.toggled();
            println!("Temperatures now display in {}.\n", view.unit.name());
        }
        "3" => handle_timer_settings(session),
        "4" => {
            // The loop re-renders; an enabled timer also advances the scene.
        }
        "5" => handle_download(view, data),
        "6" => {
            auth::logout(session);
            println!("Logged out.\n");
        }
        "7" => return false,
        _ => println!("Invalid choice. Please enter a number from 1 to 7.\n"),
    }
    true
}

fn render_dashboard(session: &Session, view: &ViewState, data: &Dataset) {
    println!("=== ClimateScope Dashboard ===");
    let user = session.current_user().unwrap_or("guest");
    match session.users.get(user) {
        Some(account) => println!("Welcome, {} ({})!", account.username, account.email),
        None => println!("Welcome, {}!", user),
    }
    println!("Scene: {}", session.current_image());
    if session.timer.enabled {
        println!(
            "(auto refresh every {}, update #{})\n",
            session.timer.interval.label(),
            session.image_counter()
        );
    } else {
        println!("(auto refresh off)\n");
    }

    let filtered = metrics::filter_country(&data.records, &view.country);
    let summary = match metrics::summarize(&filtered, &view.country, view.unit) {
        Ok(summary) => summary,
        Err(e) => {
            println!("{}\n", e);
            return;
        }
    };

    println!("Data preview ({}):", view.country);
    output::print_table(&output::preview_rows(&filtered), 5);

    println!("Summary statistics ({} records):", summary.record_count);
    output::print_table(&[output::summary_row(&summary)], 1);

    if metrics::heat_alert(view.unit, summary.max_temp) {
        println!("Heat alert! Temperatures above 35°C recorded in {}!\n", view.country);
    }

    let risk = metrics::assess_risk(&filtered, &summary);
    println!(
        "Climate risk index: {}/100 ({})\n",
        risk.score,
        risk.level.label()
    );

    println!("{}\n", insight::generate(&summary));

    println!("Monthly average temperature:");
    let months = metrics::monthly_means(&filtered, view.unit);
    output::print_table(&output::monthly_rows(&months, view.unit), 12);

    match metrics::extreme_days(&filtered, &view.country, view.unit) {
        Ok(extremes) => {
            println!("Extreme days:");
            output::print_table(&output::extreme_rows(&extremes, view.unit), 2);
        }
        Err(e) => println!("{}\n", e),
    }
}

fn handle_select_country(view: &mut ViewState, data: &Dataset) {
    println!(
        "{} countries available. Type a name exactly as listed, 'list' to see them, or leave blank to keep {}.",
        data.countries.len(),
        view.country
    );
    loop {
        let input = prompt("Country: ");
        if input.is_empty() {
            println!("");
            return;
        }
        if input == "list" {
            for chunk in data.countries.chunks(5) {
                println!("  {}", chunk.join(", "));
            }
            continue;
        }
        if data.countries.iter().any(|c| c == &input) {
            view.country = input;
            println!("Country set to {}.\n", view.country);
            return;
        }
        println!("Unknown country '{}'. Names are case-sensitive.", input);
    }
}

fn handle_timer_settings(session: &mut Session) {
    if !prompt_yes_no("Enable auto refresh (Y/N): ") {
        session.set_timer(false, session.timer.interval);
        println!("Auto refresh off.\n");
        return;
    }
    println!("Refresh interval:");
    for (idx, interval) in RefreshInterval::ALL.iter().enumerate() {
        println!("[{}] {}", idx + 1, interval.label());
    }
    let interval = loop {
        match read_choice().as_str() {
            "1" => break RefreshInterval::ALL[0],
            "2" => break RefreshInterval::ALL[1],
            "3" => break RefreshInterval::ALL[2],
            _ => println!("Invalid choice. Please enter 1, 2 or 3."),
        }
    };
    session.set_timer(true, interval);
    tracing::info!(interval_ms = interval.millis(), "auto refresh enabled");
    println!("Auto refresh every {}.\n", interval.label());
}

fn handle_download(view: &ViewState, data: &Dataset) {
    let filtered = metrics::filter_country(&data.records, &view.country);
    match output::export_country_csv(&filtered, &view.country, Path::new(".")) {
        Ok(path) => println!("Saved {} rows to {}.\n", filtered.len(), path.display()),
        Err(e) => eprintln!("Write error: {}", e),
    }
}
