//! edugraph CLI: search a material catalog and plan learning paths.
//!
//! Usage:
//!   edugraph import <catalog> [--db path]
//!   edugraph search [-a age] [-t topic] [-l language] [-c concept] [-e level]
//!   edugraph values <dimension> [--all]
//!   edugraph deps <material>
//!   edugraph path <material> [--known id,...]
//!   edugraph interview

use clap::{Args, Parser, Subcommand, ValueEnum};
use edugraph::interview::Choice;
use edugraph::{
    CatalogLoader, Criteria, Dimension, Interview, InterviewError, Library, OpenStore,
    Prompter, SearchOrder, SqliteStore,
};
use std::collections::BTreeSet;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "edugraph",
    version,
    about = "Faceted search and learning paths over a material catalog"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct Source {
    /// Path to SQLite database file
    #[arg(long, conflicts_with = "catalog")]
    db: Option<PathBuf>,
    /// Query a catalog file directly instead of a database
    #[arg(long)]
    catalog: Option<PathBuf>,
}

#[derive(Args)]
struct Filters {
    /// Age range, e.g. 8-10
    #[arg(short = 'a', long)]
    age: Option<String>,
    /// Topic
    #[arg(short = 't', long)]
    topic: Option<String>,
    /// Programming language
    #[arg(short = 'l', long)]
    language: Option<String>,
    /// Taught concept
    #[arg(short = 'c', long)]
    concept: Option<String>,
    /// Education level
    #[arg(short = 'e', long)]
    education: Option<String>,
}

impl Filters {
    fn criteria(&self) -> Criteria {
        let mut criteria = Criteria::new();
        let fields = [
            (Dimension::Age, &self.age),
            (Dimension::Topic, &self.topic),
            (Dimension::Language, &self.language),
            (Dimension::Concept, &self.concept),
            (Dimension::Education, &self.education),
        ];
        for (dimension, value) in fields {
            if let Some(value) = value {
                criteria.set(dimension, value);
            }
        }
        criteria
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Print {
    Plain,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a YAML or JSON catalog into the database
    Import {
        /// Catalog file
        catalog: PathBuf,
        /// Path to SQLite database file
        #[arg(long)]
        db: Option<PathBuf>,
    },
    /// List materials matching the filters
    Search {
        #[command(flatten)]
        filters: Filters,
        /// Group results by course
        #[arg(long)]
        by_course: bool,
        #[arg(short = 'p', long, value_enum, default_value = "plain")]
        print: Print,
        #[command(flatten)]
        source: Source,
    },
    /// List the values a dimension can still take
    Values {
        /// age, topic, language, concept or education
        dimension: Dimension,
        #[command(flatten)]
        filters: Filters,
        /// Ignore the filters
        #[arg(long)]
        all: bool,
        #[arg(short = 'p', long, value_enum, default_value = "plain")]
        print: Print,
        #[command(flatten)]
        source: Source,
    },
    /// Show every prerequisite of a material
    Deps {
        material: String,
        #[arg(short = 'p', long, value_enum, default_value = "plain")]
        print: Print,
        #[command(flatten)]
        source: Source,
    },
    /// Show what is left to study before a material
    Path {
        material: String,
        /// Materials already studied
        #[arg(long, value_delimiter = ',')]
        known: Vec<String>,
        #[command(flatten)]
        source: Source,
    },
    /// Answer questions to pick a material and plan its path
    Interview {
        #[command(flatten)]
        source: Source,
    },
}

/// Get the default database path (~/.local/share/edugraph/edugraph.db)
fn default_db_path() -> PathBuf {
    let data_dir = dirs::data_dir()
        .unwrap_or_else(|| dirs::home_dir().unwrap_or_default().join(".local/share"));
    let edugraph_dir = data_dir.join("edugraph");
    std::fs::create_dir_all(&edugraph_dir).ok();
    edugraph_dir.join("edugraph.db")
}

fn open_store(db: Option<PathBuf>) -> Result<SqliteStore, String> {
    let db_path = db.unwrap_or_else(default_db_path);
    tracing::debug!(path = %db_path.display(), "opening database");
    SqliteStore::open(&db_path).map_err(|e| format!("Failed to open database: {}", e))
}

fn open_library(source: Source) -> Result<Library, String> {
    if let Some(catalog) = source.catalog {
        let (library, report) = Library::from_catalog(&catalog)
            .map_err(|e| format!("Failed to load '{}': {}", catalog.display(), e))?;
        for rejected in &report.rejected {
            eprintln!("Warning: {}", rejected);
        }
        return Ok(library);
    }
    let store = open_store(source.db)?;
    Library::new(Arc::new(store)).map_err(|e| format!("Failed to index prerequisites: {}", e))
}

fn with_library(source: Source, run: impl FnOnce(&Library) -> i32) -> i32 {
    match open_library(source) {
        Ok(library) => run(&library),
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> i32 {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            println!("{}", json);
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn cmd_import(catalog: &PathBuf, db: Option<PathBuf>) -> i32 {
    let store = match open_store(db) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };
    match CatalogLoader::new(&store).load_path(catalog) {
        Ok(report) => {
            for rejected in &report.rejected {
                eprintln!("Rejected {}", rejected);
            }
            println!(
                "Loaded {} materials ({} new facts, {} rejected)",
                report.loaded,
                report.facts_added,
                report.rejected.len()
            );
            if report.is_clean() {
                0
            } else {
                2
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn cmd_search(library: &Library, filters: &Filters, by_course: bool, print: Print) -> i32 {
    let order = if by_course {
        SearchOrder::ByCourse
    } else {
        SearchOrder::ById
    };
    let rows = match library.search_ordered(&filters.criteria(), order) {
        Ok(rows) => rows,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };
    match print {
        Print::Json => print_json(&rows),
        Print::Plain => {
            if rows.is_empty() {
                println!("No materials found.");
            }
            for row in &rows {
                println!("{}", row);
            }
            0
        }
    }
}

fn cmd_values(library: &Library, dimension: Dimension, filters: &Filters, all: bool, print: Print) -> i32 {
    let values = match library.list_values(dimension, &filters.criteria(), !all) {
        Ok(values) => values,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };
    match print {
        Print::Json => print_json(&values),
        Print::Plain => {
            for value in &values {
                println!("{}", value);
            }
            0
        }
    }
}

fn cmd_deps(library: &Library, material: &str, print: Print) -> i32 {
    match library.title(material) {
        Ok(Some(_)) => {}
        Ok(None) => {
            eprintln!("Error: material '{}' not found", material);
            return 1;
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    }
    let prerequisites = match library.resolve_prerequisites(material) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };
    match print {
        Print::Json => print_json(&prerequisites),
        Print::Plain => {
            if prerequisites.is_empty() {
                println!("'{}' has no prerequisites.", material);
            }
            for p in &prerequisites {
                println!("{}", p.display_line());
            }
            0
        }
    }
}

fn cmd_path(library: &Library, material: &str, known: Vec<String>) -> i32 {
    let known: BTreeSet<String> = known
        .into_iter()
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty())
        .collect();
    match library.learning_path(material, &known) {
        Ok(lines) => {
            if lines.is_empty() {
                println!("Nothing left to study before '{}'.", material);
            }
            for line in &lines {
                println!("{}", line);
            }
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

/// Numbered prompts on stdout, answers read from stdin
struct StdinPrompter<R> {
    input: R,
}

impl<R: BufRead> StdinPrompter<R> {
    fn ask(&mut self, question: &str, choices: &[Choice], hint: &str) -> std::io::Result<String> {
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{}", question)?;
        for (i, choice) in choices.iter().enumerate() {
            writeln!(stdout, "  {:>2}) {}", i + 1, choice.label)?;
        }
        write!(stdout, "{} ", hint)?;
        stdout.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                "input closed",
            ));
        }
        Ok(line)
    }

    fn parse_index(token: &str, count: usize) -> Option<usize> {
        let n: usize = token.trim().parse().ok()?;
        (1..=count).contains(&n).then(|| n - 1)
    }
}

impl<R: BufRead> Prompter for StdinPrompter<R> {
    fn select_one(&mut self, question: &str, choices: &[Choice]) -> std::io::Result<usize> {
        loop {
            let line = self.ask(question, choices, ">")?;
            match Self::parse_index(&line, choices.len()) {
                Some(index) => return Ok(index),
                None => eprintln!("Enter a number between 1 and {}", choices.len()),
            }
        }
    }

    fn select_many(&mut self, question: &str, choices: &[Choice]) -> std::io::Result<Vec<usize>> {
        loop {
            let line = self.ask(question, choices, "(numbers separated by commas, blank for none) >")?;
            if line.trim().is_empty() {
                return Ok(Vec::new());
            }
            let picked: Option<Vec<usize>> = line
                .split(',')
                .map(|token| Self::parse_index(token, choices.len()))
                .collect();
            match picked {
                Some(indices) => return Ok(indices),
                None => eprintln!("Enter numbers between 1 and {}", choices.len()),
            }
        }
    }
}

fn cmd_interview(library: &Library) -> i32 {
    let stdin = std::io::stdin();
    let mut prompter = StdinPrompter { input: stdin.lock() };

    let session = match Interview::new(library).run(&mut prompter) {
        Ok(session) => session,
        Err(InterviewError::NoChoices(step)) => {
            eprintln!("No materials match your answers (at {}).", step);
            return 1;
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };

    if let Some(material) = &session.material {
        println!();
        println!("Learning path for {}:", material);
    }
    if session.path.is_empty() {
        println!("Nothing left to study first.");
    }
    for line in &session.path {
        println!("{}", line);
    }
    0
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let code = match cli.command {
        Commands::Import { catalog, db } => cmd_import(&catalog, db),
        Commands::Search {
            filters,
            by_course,
            print,
            source,
        } => with_library(source, |l| cmd_search(l, &filters, by_course, print)),
        Commands::Values {
            dimension,
            filters,
            all,
            print,
            source,
        } => with_library(source, |l| cmd_values(l, dimension, &filters, all, print)),
        Commands::Deps {
            material,
            print,
            source,
        } => with_library(source, |l| cmd_deps(l, &material, print)),
        Commands::Path {
            material,
            known,
            source,
        } => with_library(source, |l| cmd_path(l, &material, known)),
        Commands::Interview { source } => with_library(source, cmd_interview),
    };
    std::process::exit(code);
}
