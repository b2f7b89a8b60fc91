use crate::catalog::loader::{CourseLoader, LoadSummary};
use crate::common::config::{CatalogConfig, ValidationMode, DEFAULT_BUCKET_COUNT, DEFAULT_HISTORY_FILE};
use crate::common::exception::CatalogError;
use crate::common::logger::{initialize_logger_with_level, level_for_verbosity};
use crate::common::result_writer::{CliResultWriter, ResultWriter};
use crate::container::chained_hash_table::CourseTable;
use clap::Parser;
use colored::*;
use log::{debug, warn};
use parking_lot::RwLock;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Course file to load (prompted for when omitted)
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Number of hash table buckets
    #[arg(short, long, default_value_t = DEFAULT_BUCKET_COUNT)]
    pub buckets: usize,

    /// Validate prerequisites in a single pass instead of cascading removals
    #[arg(long)]
    pub single_pass: bool,

    #[arg(long, default_value = DEFAULT_HISTORY_FILE)]
    pub history: String,

    /// Increase log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    pub fn into_config(self) -> CatalogConfig {
        CatalogConfig {
            bucket_count: self.buckets,
            validation_mode: if self.single_pass {
                ValidationMode::SinglePass
            } else {
                ValidationMode::FixedPoint
            },
            course_file: self.file,
            history_file: self.history,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuChoice {
    LoadCourses,
    PrintCourses,
    PrintCourse,
    Help,
    Exit,
    Invalid(String),
}

impl MenuChoice {
    pub fn parse(input: &str) -> Self {
        match input.trim().to_lowercase().as_str() {
            "1" => MenuChoice::LoadCourses,
            "2" => MenuChoice::PrintCourses,
            "3" => MenuChoice::PrintCourse,
            "9" | "exit" | "quit" => MenuChoice::Exit,
            "help" | "menu" => MenuChoice::Help,
            other => MenuChoice::Invalid(other.to_string()),
        }
    }
}

/// Runs menu commands against one shared table.
pub struct CatalogCommandExecutor {
    table: Arc<RwLock<CourseTable>>,
    loader: CourseLoader,
    course_file: Option<PathBuf>,
}

impl CatalogCommandExecutor {
    pub fn new(config: &CatalogConfig) -> Result<Self, CatalogError> {
        Ok(Self {
            table: Arc::new(RwLock::new(CourseTable::with_bucket_count(config.bucket_count)?)),
            loader: CourseLoader::new(config.validation_mode),
            course_file: config.course_file.clone(),
        })
    }

    pub fn get_table(&self) -> Arc<RwLock<CourseTable>> {
        Arc::clone(&self.table)
    }

    pub fn set_course_file(&mut self, path: PathBuf) {
        self.course_file = Some(path);
    }

    pub fn load_courses(&self, writer: &mut impl ResultWriter) -> Result<LoadSummary, CatalogError> {
        let path = self.course_file.as_ref().ok_or_else(|| {
            CatalogError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "no course file selected",
            ))
        })?;

        writer.write_message("Loading courses from file");
        let mut table = self.table.write();
        let summary = self.loader.load_file(path, &mut table)?;

        for rejected in &summary.rejected {
            writer.write_message(
                &format!("Error parsing line {}: {}", rejected.line_number, rejected.line)
                    .red()
                    .to_string(),
            );
            writer.write_message(&rejected.reason);
        }
        for number in &summary.duplicates {
            writer.write_message(
                &format!("Duplicate found, Course {} already exists.", number)
                    .yellow()
                    .to_string(),
            );
        }
        for removed in &summary.validation.removed {
            writer.write_message(
                &format!(
                    "Error: Course {} has an invalid prerequisite: {}",
                    removed.number, removed.missing_prerequisite
                )
                .red()
                .to_string(),
            );
            writer.write_message(&format!(
                "Course {} removed due to invalid prerequisite.",
                removed.number
            ));
        }
        writer.write_message(&"Files loaded successfully".green().to_string());
        Ok(summary)
    }

    pub fn print_courses(&self, writer: &mut impl ResultWriter) {
        let table = self.table.read();
        if table.is_empty() {
            writer.write_message(&"No courses loaded.".yellow().to_string());
            return;
        }
        table.print_all_to(writer);
    }

    pub fn print_course(&self, number: &str, writer: &mut impl ResultWriter) {
        let course = self.table.read().search(number.trim());
        if course.is_empty() {
            writer.write_message(&format!(
                "Course Number: {} not found. Please enter valid course number.",
                number.trim()
            ));
        } else {
            writer.write_message(&course.to_string());
        }
    }

    pub fn display_menu(&self) {
        println!("\n{}", "Main Menu".bold());
        println!("  1. Load Courses");
        println!("  2. Print Courses List");
        println!("  3. Print Course Info");
        println!("  9. Exit Program");
    }
}

fn prompt_line(rl: &mut DefaultEditor, prompt: &str) -> Result<Option<String>, CatalogError> {
    match rl.readline(prompt) {
        Ok(line) => Ok(Some(line.trim().to_string())),
        Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn run_cli() -> Result<(), CatalogError> {
    let args = Args::parse();
    initialize_logger_with_level(level_for_verbosity(args.verbose));
    let config = args.into_config();
    debug!("Starting with {:?}", config);

    println!("{}", "\nCourse Catalog".blue().bold());

    let mut executor = CatalogCommandExecutor::new(&config)?;

    let mut rl = DefaultEditor::new()?;
    if rl.load_history(&config.history_file).is_err() {
        println!("{}", "No previous history.".yellow());
    }

    if config.course_file.is_none() {
        match prompt_line(&mut rl, "Please enter name of file to open: ")? {
            Some(file) if !file.is_empty() => executor.set_course_file(PathBuf::from(file)),
            Some(_) => {}
            None => return Ok(()),
        }
    }

    executor.display_menu();

    loop {
        let Some(command) = prompt_line(&mut rl, "Please enter choice: ")? else {
            break;
        };
        if command.is_empty() {
            continue;
        }
        rl.add_history_entry(command.as_str())?;

        let mut writer = CliResultWriter::new();

        match MenuChoice::parse(&command) {
            MenuChoice::LoadCourses => {
                if let Err(e) = executor.load_courses(&mut writer) {
                    println!("{}", format!("Error: {}", e).red());
                }
            }
            MenuChoice::PrintCourses => executor.print_courses(&mut writer),
            MenuChoice::PrintCourse => {
                let Some(number) =
                    prompt_line(&mut rl, "Please enter a valid course number (i.e. MATH201): ")?
                else {
                    break;
                };
                executor.print_course(&number, &mut writer);
            }
            MenuChoice::Help => executor.display_menu(),
            MenuChoice::Exit => {
                println!("Shutting down...");
                break;
            }
            MenuChoice::Invalid(choice) => {
                debug!("Invalid menu choice '{}'", choice);
                writer.write_message(
                    &"Invalid choice. Please Enter an available option."
                        .yellow()
                        .to_string(),
                );
            }
        }
    }

    note_history_saved(rl.save_history(&config.history_file), &config.history_file);
    Ok(())
}

/// An unwritable history file does not turn a normal exit into an error.
fn note_history_saved(result: Result<(), ReadlineError>, history_file: &str) -> bool {
    match result {
        Ok(()) => true,
        Err(e) => {
            warn!("Could not save history to {}: {}", history_file, e);
            false
        }
    }
}
