// Visa document verification CLI
// Runs the same engine the visa service exposes over HTTP.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::info;

use visacheck::models::{DocumentUpload, VerificationRequest, VerificationResponse};
use visacheck::processing::TesseractExtractor;
use visacheck::storage::DocumentStore;
use visacheck::VisaVerifier;

#[derive(Parser)]
#[command(name = "visacheck")]
#[command(about = "Verify a visa document against expected traveler details")]
struct Args {
    /// Traveler name expected on the document
    #[arg(long)]
    name: String,

    /// Traveler email expected on the document
    #[arg(long)]
    email: String,

    /// Employing company expected on the document
    #[arg(long)]
    company: String,

    /// Travel destination expected on the document
    #[arg(long)]
    destination: String,

    /// Traveler phone number (any punctuation form)
    #[arg(long)]
    phone: String,

    /// Path to the visa document (image or pdf)
    #[arg(long)]
    visa: PathBuf,

    /// Directory the document is staged in during verification
    #[arg(long, default_value = "visa_uploads")]
    upload_dir: PathBuf,

    /// OCR language
    #[arg(long, default_value = "eng")]
    lang: String,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();
    info!("Starting visa verification");

    let bytes = match fs::read(&args.visa) {
        Ok(bytes) => bytes,
        Err(e) => {
            eprintln!("Could not read visa file {:?}: {}", args.visa, e);
            return ExitCode::FAILURE;
        }
    };
    let filename = args
        .visa
        .file_name()
        .map(|n| n.to_string_lossy().into_owned());

    let request = VerificationRequest {
        name: args.name,
        email: args.email,
        company: args.company,
        destination: args.destination,
        phone: args.phone,
        document: Some(DocumentUpload::new(filename, bytes)),
    };

    let store = match DocumentStore::new(&args.upload_dir) {
        Ok(store) => store,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    let verifier = VisaVerifier::new(store, TesseractExtractor::new(&args.lang));

    let outcome = verifier.verify(&request);
    let response = VerificationResponse::from(&outcome);
    match serde_json::to_string_pretty(&response) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Could not render response: {}", e);
            return ExitCode::FAILURE;
        }
    }

    if outcome.http_status() == 200 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
