/// Command-line interface for browsing a synthetic appointment calendar.
///
/// This binary generates one schedule at startup and provides an
/// interactive menu for searching, filtering, switching views and
/// navigating through it.

use clap::Parser;
use chrono::{Datelike, Local, NaiveDate};
use mediplan::aggregate::aggregate_by_week;
use mediplan::generator::week_agenda;
use mediplan::navigator::week_start;
use mediplan::portal::{menu_items, Role};
use mediplan::{
    filter_patients, filter_users, generate, AgendaConfig, AppointmentRecord, CalendarSession,
    CalendarView, Category, Direction, Directory, GeneratorConfig, RoleFilter, Status,
};
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "mediplan", about = "Browse a synthetic appointment calendar")]
struct Args {
    /// JSON generator configuration; defaults to the built-in fixtures
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for reproducible generation
    #[arg(long)]
    seed: Option<u64>,

    /// Calendar year to generate (ignored when --config is given)
    #[arg(long)]
    year: Option<i32>,

    /// Dashboard role whose menu is shown
    #[arg(long, default_value = "hospital")]
    role: String,
}

const MAX_DISPLAY: usize = 20;

struct CalendarCLI {
    session: CalendarSession,
    specialties: Vec<String>,
    agenda: AgendaConfig,
    directory: Directory,
    role: Role,
    running: bool,
}

impl CalendarCLI {
    fn new(
        session: CalendarSession,
        specialties: Vec<String>,
        directory: Directory,
        role: Role,
        seed: Option<u64>,
    ) -> Self {
        let mut agenda = AgendaConfig::default();
        agenda.seed = seed;
        CalendarCLI {
            session,
            specialties,
            agenda,
            directory,
            role,
            running: true,
        }
    }

    fn print_header(&self) {
        println!("\n{}", "=".repeat(60));
        println!("       MEDIPLAN APPOINTMENT CALENDAR");
        println!("{}", "=".repeat(60));
        println!(
            "Dataset {} - {} appointments",
            self.session.dataset().dataset_id,
            self.session.records().len()
        );
    }

    fn print_menu(&self) {
        println!("\n--- {} | {} ---", self.session.heading(), self.session.view().name());
        println!("1. Search patient or doctor");
        println!("2. Filter by specialty");
        println!("3. Switch view (day/month/year)");
        println!("4. Previous");
        println!("5. Next");
        println!("6. Today");
        println!("7. Show calendar");
        println!("8. Doctor week agenda");
        println!("9. Export filtered appointments (JSON)");
        println!("10. Show dashboard menu");
        println!("11. Search user directory");
        println!("12. Search patient directory");
        println!("0. Exit");
        println!("{}", "-".repeat(20));
    }

    /// Read one line; `None` on end of input.
    fn get_input(&self, prompt: &str, default: Option<&str>) -> Option<String> {
        if let Some(def) = default {
            print!("{} [{}]: ", prompt, def);
        } else {
            print!("{}: ", prompt);
        }
        io::stdout().flush().ok();

        let mut input = String::new();
        match io::stdin().read_line(&mut input) {
            Ok(0) | Err(_) => return None,
            Ok(_) => {}
        }
        let input = input.trim();

        if input.is_empty() {
            Some(default.unwrap_or("").to_string())
        } else {
            Some(input.to_string())
        }
    }

    fn get_int_input(&self, prompt: &str, default: Option<i32>) -> Option<i32> {
        loop {
            let default_str = default.map(|d| d.to_string());
            let input = self.get_input(prompt, default_str.as_deref())?;

            if let Ok(value) = input.parse::<i32>() {
                return Some(value);
            }
            println!("Please enter a valid number");
        }
    }

    fn search(&mut self) {
        let Some(query) = self.get_input("Search (empty to clear)", Some("")) else {
            return;
        };
        self.session.set_query(query);
        println!("\n{} matching appointments", self.session.filtered().len());
    }

    fn choose_specialty(&mut self) {
        println!("\nSpecialties:");
        println!("  0. All specialties");
        for (i, specialty) in self.specialties.iter().enumerate() {
            println!("  {}. {}", i + 1, specialty);
        }
        let Some(choice) = self.get_int_input("Select specialty", Some(0)) else {
            return;
        };

        let category = match choice {
            0 => Category::All,
            n if n > 0 && (n as usize) <= self.specialties.len() => {
                Category::Specialty(self.specialties[n as usize - 1].clone())
            }
            _ => {
                println!("Invalid choice");
                return;
            }
        };
        self.session.set_category(category);
        println!("\n{} matching appointments", self.session.filtered().len());
    }

    fn switch_view(&mut self) {
        println!("\n  1. Day\n  2. Month\n  3. Year");
        let view = match self.get_int_input("Select view", Some(2)) {
            Some(1) => CalendarView::Day,
            Some(2) => CalendarView::Month,
            Some(3) => CalendarView::Year,
            Some(_) => {
                println!("Invalid choice");
                return;
            }
            None => return,
        };
        self.session.set_view(view);
    }

    fn navigate(&mut self, direction: Direction) {
        self.session.navigate(direction);
        println!("\n{}", self.session.heading());
    }

    fn show_calendar(&mut self) {
        match self.session.view() {
            CalendarView::Year => self.show_year(),
            CalendarView::Month => self.show_month(),
            CalendarView::Day => self.show_day(),
        }
        println!("\n{} appointments in total", self.session.filtered().len());
    }

    fn show_year(&mut self) {
        println!("\n--- {} ---", self.session.heading());
        println!(
            "  {:<10} {:>6} {:>10} {:>8} {:>10}",
            "Month", "Total", "Confirmed", "Pending", "Cancelled"
        );
        let year = self.session.current_date().year();
        for bucket in self.session.year_overview() {
            let label = NaiveDate::from_ymd_opt(year, bucket.month + 1, 1)
                .map(|d| d.format("%B").to_string())
                .unwrap_or_default();
            println!(
                "  {:<10} {:>6} {:>9.0}% {:>7.0}% {:>9.0}%",
                label,
                bucket.total(),
                bucket.share(Status::Confirmed),
                bucket.share(Status::Pending),
                bucket.share(Status::Cancelled)
            );
        }

        let Some(month) = self.get_int_input("Open month (1-12, 0 to stay)", Some(0)) else {
            return;
        };
        if month > 0 && self.session.select_month(month as u32 - 1) {
            self.show_month();
        }
    }

    fn show_month(&self) {
        let records = self.session.in_selection();
        if records.is_empty() {
            println!("\nNo appointments in this period");
            return;
        }

        println!("\n--- {} ({} appointments) ---", self.session.heading(), records.len());
        let mut current_date = None;
        for (i, apt) in records.iter().enumerate() {
            if i >= MAX_DISPLAY {
                println!("\n... and {} more appointments", records.len() - MAX_DISPLAY);
                break;
            }
            if Some(apt.date()) != current_date {
                current_date = Some(apt.date());
                println!("\n{}:", apt.date().format("%A, %Y-%m-%d"));
            }
            print_record(apt);
        }
    }

    fn show_day(&self) {
        let summary = self.session.day_summary();
        println!("\n--- {} ---", self.session.heading());
        println!(
            "  {} appointments, {} confirmed, {} pending",
            summary.counts.total, summary.counts.confirmed, summary.counts.pending
        );
        match summary.next {
            Some(next) => println!(
                "  Next: {} - {}",
                next.start.format("%H:%M"),
                next.patient_name
            ),
            None => println!("  Next: none"),
        }

        let agenda = self.session.day_agenda();
        if agenda.is_empty() {
            println!("\nNo appointments on this day");
            return;
        }
        println!();
        for apt in agenda {
            print_record(apt);
        }
    }

    fn show_week_agenda(&self) {
        let monday = week_start(self.session.current_date());
        let agenda = match week_agenda(&self.agenda, monday) {
            Ok(agenda) => agenda,
            Err(e) => {
                println!("Error generating agenda: {}", e);
                return;
            }
        };

        println!(
            "\n--- {} ({}) - week of {} ---",
            self.agenda.doctor,
            self.agenda.specialty,
            monday.format("%-d %B %Y")
        );
        for day in aggregate_by_week(&agenda, monday) {
            if day.is_weekend {
                println!("  {}: -", day.date.format("%a %d"));
            } else {
                println!(
                    "  {}: {} appointments ({} confirmed)",
                    day.date.format("%a %d"),
                    day.counts.total,
                    day.counts.confirmed
                );
            }
        }

        let mut current_date = None;
        for apt in &agenda {
            if Some(apt.date()) != current_date {
                current_date = Some(apt.date());
                println!("\n{}:", apt.date().format("%A, %Y-%m-%d"));
            }
            print_record(apt);
        }
    }

    fn export(&self) {
        match serde_json::to_string_pretty(&self.session.filtered()) {
            Ok(json) => println!("{}", json),
            Err(e) => println!("Error exporting appointments: {}", e),
        }
    }

    fn show_role_menu(&self) {
        println!("\n--- Dashboard menu ({}) ---", self.role.name());
        for item in menu_items(self.role) {
            println!("  {:<20} {}", item.label, item.href);
        }
    }

    fn search_users(&self) {
        let Some(query) = self.get_input("Name or email", Some("")) else {
            return;
        };
        let Some(role) = self.get_input("Role (all/admin/hospital/doctor/patient)", Some("all")) else {
            return;
        };
        let role = match RoleFilter::from_string(&role) {
            Ok(role) => role,
            Err(e) => {
                println!("{}", e);
                return;
            }
        };

        let users = filter_users(&self.directory.users, &query, &role);
        println!(
            "\n{} of {} users ({} active)",
            users.len(),
            self.directory.users.len(),
            self.directory.active_users()
        );
        for user in users {
            println!(
                "  {:<20} {:<28} {:<9} {:<14} {}",
                user.name,
                user.email,
                user.role.name(),
                user.hospital,
                user.last_login.format("%Y-%m-%d %H:%M")
            );
        }
    }

    fn search_patients(&self) {
        let Some(query) = self.get_input("Patient name", Some("")) else {
            return;
        };
        let patients = filter_patients(&self.directory.patients, &query);
        println!("\n{} patients", patients.len());
        for patient in patients {
            let next = patient
                .next_appointment
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| "-".to_string());
            println!(
                "  {:<16} {:>3} ans  {:<20} next: {}",
                patient.name, patient.age, patient.condition, next
            );
        }
    }

    fn run(&mut self) {
        self.print_header();

        while self.running {
            self.print_menu();

            let Some(choice) = self.get_int_input("Enter choice", Some(7)) else {
                break;
            };

            match choice {
                1 => self.search(),
                2 => self.choose_specialty(),
                3 => self.switch_view(),
                4 => self.navigate(Direction::Prev),
                5 => self.navigate(Direction::Next),
                6 => self.navigate(Direction::Today),
                7 => self.show_calendar(),
                8 => self.show_week_agenda(),
                9 => self.export(),
                10 => self.show_role_menu(),
                11 => self.search_users(),
                12 => self.search_patients(),
                0 => {
                    self.running = false;
                    println!("\nGoodbye!");
                }
                _ => println!("Invalid choice"),
            }
        }
    }
}

fn print_record(apt: &AppointmentRecord) {
    println!(
        "  {} - {}  {:<16} {:<20} {:<14} {:<10} {}",
        apt.start.format("%H:%M"),
        apt.end.format("%H:%M"),
        apt.patient_name,
        apt.doctor_name,
        apt.specialty,
        apt.room,
        apt.status.name()
    );
    if let (Some(age), Some(condition)) = (apt.patient_age, &apt.condition) {
        println!("            {} ans, {}", age, condition);
    }
}

fn load_config(args: &Args) -> mediplan::Result<GeneratorConfig> {
    let mut config = match (&args.config, args.year) {
        (Some(path), _) => GeneratorConfig::from_path(path)?,
        (None, Some(year)) => GeneratorConfig::for_year(year)?,
        (None, None) => GeneratorConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    Ok(config)
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let role = match Role::from_string(&args.role) {
        Ok(role) => role,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(2);
        }
    };

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    let dataset = match generate(&config) {
        Ok(dataset) => dataset,
        Err(e) => {
            eprintln!("Error generating appointments: {}", e);
            std::process::exit(1);
        }
    };

    let specialties = config.specialties().map(str::to_string).collect();
    let session = CalendarSession::new(dataset, Local::now().date_naive());
    let mut cli = CalendarCLI::new(session, specialties, Directory::fixtures(), role, config.seed);
    cli.run();
}
