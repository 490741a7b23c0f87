use clap::{Args, Parser, Subcommand};
use fitlog_core::*;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "fitlog")]
#[command(about = "Daily fitness measurement log", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Override data file name
    #[arg(long, global = true)]
    file: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Record a new entry
    Add {
        /// Entry date label (defaults to today, YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,

        /// Resting heart rate (bpm)
        #[arg(long, allow_hyphen_values = true)]
        heart_rate: i32,

        #[arg(long, allow_hyphen_values = true)]
        steps: i32,

        #[arg(long, allow_hyphen_values = true)]
        calories: i32,

        /// Hours slept; `7.5` and `7,5` are both accepted
        #[arg(long, allow_hyphen_values = true)]
        sleep: String,

        /// Body weight in kg; `71.5` and `71,5` are both accepted
        #[arg(long, allow_hyphen_values = true)]
        weight: String,
    },

    /// List all entries (default)
    List {
        /// Print entries as JSON
        #[arg(long)]
        json: bool,
    },

    /// Replace fields of an existing entry
    Update {
        /// Entry number as shown by `list`
        number: usize,

        #[command(flatten)]
        fields: UpdateFields,
    },

    /// Delete an entry
    Delete {
        /// Entry number as shown by `list`
        number: usize,
    },

    /// Append the entries of another data file
    Import {
        #[arg(value_name = "FILE")]
        source: String,
    },

    /// Save the current entries to another data file
    Export {
        #[arg(value_name = "FILE")]
        target: String,
    },
}

/// Fields left out keep their current value
#[derive(Args)]
struct UpdateFields {
    #[arg(long)]
    date: Option<String>,

    #[arg(long, allow_hyphen_values = true)]
    heart_rate: Option<i32>,

    #[arg(long, allow_hyphen_values = true)]
    steps: Option<i32>,

    #[arg(long, allow_hyphen_values = true)]
    calories: Option<i32>,

    #[arg(long, allow_hyphen_values = true)]
    sleep: Option<String>,

    #[arg(long, allow_hyphen_values = true)]
    weight: Option<String>,
}

impl UpdateFields {
    fn into_patch(self) -> Result<EntryPatch> {
        Ok(EntryPatch {
            date: self.date,
            heart_rate: self.heart_rate,
            steps: self.steps,
            calories: self.calories,
            sleep_hours: self.sleep.as_deref().map(parse_decimal).transpose()?,
            weight_kg: self.weight.as_deref().map(parse_decimal).transpose()?,
        })
    }
}

/// The loaded journal together with where it is persisted
struct Session {
    store: CsvStore,
    file: String,
    journal: Journal,
}

impl Session {
    fn open(store: CsvStore, file: String) -> Self {
        let mut journal = Journal::new();
        if store.exists(&file) {
            journal.extend(store.load(&file));
            tracing::debug!("Loaded {} entries from {}", journal.len(), file);
        }
        Self {
            store,
            file,
            journal,
        }
    }

    fn save(&self) -> Result<()> {
        if self.store.save(Some(self.journal.entries()), &self.file)? {
            Ok(())
        } else {
            Err(Error::Other("Save failed.".into()))
        }
    }

    /// Convert a 1-based entry number to a journal index
    fn index_of(&self, number: usize) -> Result<usize> {
        if number == 0 || number > self.journal.len() {
            return Err(Error::InvalidPosition {
                position: number,
                len: self.journal.len(),
            });
        }
        Ok(number - 1)
    }
}

fn main() {
    fitlog_core::logging::init();

    if let Err(e) = run(Cli::parse()) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::load()?;
    let store = match cli.data_dir {
        Some(dir) => CsvStore::new(dir),
        None => config.store(),
    };
    let file = cli.file.unwrap_or_else(|| config.data.file_name.clone());

    let mut session = Session::open(store, file);

    match cli.command {
        Some(Commands::Add {
            date,
            heart_rate,
            steps,
            calories,
            sleep,
            weight,
        }) => {
            let date = date.unwrap_or_else(|| chrono::Local::now().format("%Y-%m-%d").to_string());
            cmd_add(
                &mut session,
                &date,
                heart_rate,
                steps,
                calories,
                &sleep,
                &weight,
            )
        }
        Some(Commands::List { json }) => cmd_list(&session, json),
        Some(Commands::Update { number, fields }) => cmd_update(&mut session, number, fields),
        Some(Commands::Delete { number }) => cmd_delete(&mut session, number),
        Some(Commands::Import { source }) => cmd_import(&mut session, &source),
        Some(Commands::Export { target }) => cmd_export(&session, &target),
        None => cmd_list(&session, false),
    }
}

fn cmd_add(
    session: &mut Session,
    date: &str,
    heart_rate: i32,
    steps: i32,
    calories: i32,
    sleep: &str,
    weight: &str,
) -> Result<()> {
    let entry = FitnessEntry::new(
        date,
        heart_rate,
        steps,
        calories,
        parse_decimal(sleep)?,
        parse_decimal(weight)?,
    )?;

    session.journal.push(entry);
    session.save()?;

    println!("Entry created!");
    Ok(())
}

fn cmd_list(session: &Session, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(session.journal.entries())?);
        return Ok(());
    }

    if session.journal.is_empty() {
        println!("No entries found.");
        return Ok(());
    }

    for (i, entry) in session.journal.iter().enumerate() {
        println!("{}. {}", i + 1, entry);
    }
    Ok(())
}

fn cmd_update(session: &mut Session, number: usize, fields: UpdateFields) -> Result<()> {
    let index = session.index_of(number)?;
    let patch = fields.into_patch()?;
    if patch.is_empty() {
        println!("Nothing to update.");
        return Ok(());
    }

    let updated = session.journal.entries()[index].apply(&patch)?;
    session.journal.replace(index, updated)?;
    session.save()?;

    println!("Entry updated!");
    Ok(())
}

fn cmd_delete(session: &mut Session, number: usize) -> Result<()> {
    let index = session.index_of(number)?;
    let deleted = session.journal.remove(index)?;
    session.save()?;

    println!("Entry deleted!");
    println!("Deleted: {}", deleted);
    Ok(())
}

fn cmd_import(session: &mut Session, file: &str) -> Result<()> {
    let loaded = session.store.load(file);
    if loaded.is_empty() {
        println!("No data loaded.");
        return Ok(());
    }

    let count = loaded.len();
    session.journal.extend(loaded);
    session.save()?;

    println!("Loaded {} entries.", count);
    Ok(())
}

fn cmd_export(session: &Session, file: &str) -> Result<()> {
    if !session.store.save(Some(session.journal.entries()), file)? {
        return Err(Error::Other("Save failed.".into()));
    }

    println!(
        "Saved {} entries to {}",
        session.journal.len(),
        session.store.resolve_path(file).display()
    );
    Ok(())
}
