use clap::{Parser, Subcommand};
use pmr_core::{
    config::patient_data_file_from_env_value, CoreConfig, NewPatient, PatientRecord,
    PatientService, PatientUpdate,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pmr")]
#[command(about = "PMR patient record system CLI")]
struct Cli {
    /// Patient data file (defaults to $PATIENT_DATA_FILE, then patients.json)
    #[arg(long, global = true)]
    data_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List all patients
    List,
    /// Show one patient
    Get {
        /// Patient ID
        id: String,
    },
    /// Create a patient
    Create {
        /// Patient ID (e.g. P001)
        id: String,
        /// Full name
        name: String,
        /// City of residence
        city: String,
        /// Age in years
        age: i64,
        /// male, female or other
        gender: String,
        /// Height in metres
        height: f64,
        /// Weight in kilograms
        weight: f64,
    },
    /// Update some fields of a patient
    Update {
        /// Patient ID
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        city: Option<String>,
        #[arg(long)]
        age: Option<i64>,
        #[arg(long)]
        gender: Option<String>,
        /// Height in metres
        #[arg(long)]
        height: Option<f64>,
        /// Weight in kilograms
        #[arg(long)]
        weight: Option<f64>,
    },
    /// Delete a patient
    Delete {
        /// Patient ID
        id: String,
    },
    /// List patients sorted by height, weight or bmi
    Sort {
        /// height, weight or bmi
        field: String,
        /// asc or desc
        #[arg(long, default_value = "asc")]
        order: String,
    },
}

fn format_patient(record: &PatientRecord) -> String {
    let details = record.details();
    format!(
        "ID: {}, Name: {}, City: {}, Age: {}, Gender: {}, Height: {:.2} m, Weight: {:.1} kg, BMI: {:.2} ({})",
        record.id(),
        details.name(),
        details.city(),
        details.age(),
        details.gender(),
        details.height(),
        details.weight(),
        record.bmi(),
        record.verdict()
    )
}

fn print_patients<'a>(records: impl IntoIterator<Item = &'a PatientRecord>) {
    let mut any = false;
    for record in records {
        any = true;
        println!("{}", format_patient(record));
    }
    if !any {
        println!("No patients found.");
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let data_file = cli.data_file.unwrap_or_else(|| {
        patient_data_file_from_env_value(std::env::var("PATIENT_DATA_FILE").ok())
    });
    let cfg = CoreConfig::new(data_file)?;
    let service = PatientService::from_config(&cfg);

    match cli.command {
        Some(Commands::List) => match service.get_all() {
            Ok(store) => print_patients(store.iter()),
            Err(e) => eprintln!("Error listing patients: {}", e),
        },
        Some(Commands::Get { id }) => match service.get_one(&id) {
            Ok(record) => println!("{}", format_patient(&record)),
            Err(e) => eprintln!("Error reading patient: {}", e),
        },
        Some(Commands::Create {
            id,
            name,
            city,
            age,
            gender,
            height,
            weight,
        }) => {
            let new_patient = NewPatient {
                id,
                name,
                city,
                age,
                gender,
                height,
                weight,
            };
            match service.create(new_patient) {
                Ok(record) => println!("Created {}", format_patient(&record)),
                Err(e) => eprintln!("Error creating patient: {}", e),
            }
        }
        Some(Commands::Update {
            id,
            name,
            city,
            age,
            gender,
            height,
            weight,
        }) => {
            let update = PatientUpdate {
                name,
                city,
                age,
                gender,
                height,
                weight,
            };
            if update.is_empty() {
                println!("Nothing to update; pass at least one --field");
            } else {
                match service.update(&id, update) {
                    Ok(record) => println!("Updated {}", format_patient(&record)),
                    Err(e) => eprintln!("Error updating patient: {}", e),
                }
            }
        }
        Some(Commands::Delete { id }) => match service.delete(&id) {
            Ok(record) => println!("Deleted patient {}", record.id()),
            Err(e) => eprintln!("Error deleting patient: {}", e),
        },
        Some(Commands::Sort { field, order }) => match service.sort(&field, &order) {
            Ok(records) => print_patients(records.iter()),
            Err(e) => eprintln!("Error sorting patients: {}", e),
        },
        None => {
            println!("Use 'pmr --help' for commands");
        }
    }

    Ok(())
}
