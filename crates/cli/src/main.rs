use advisory::{AdvisoryConfig, AdvisoryResponder};
use api_shared::AssessmentRes;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use stroke_core::{
    config::scoring_config_from_env_value, constants::DEFAULT_MODEL_PATH,
    constants::DEFAULT_SCALER_PATH, load_classifier_artifact, ArtifactPaths, AssessmentForm,
    ClassifierArtifact, InferenceContext, FEATURE_NAMES,
};

#[derive(Parser)]
#[command(name = "stroke")]
#[command(about = "Stroke risk scoring CLI")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Score a single assessment
    Assess {
        /// Age in years
        #[arg(long)]
        age: String,
        /// 0 or 1
        #[arg(long)]
        hypertension: String,
        /// 0 or 1
        #[arg(long)]
        heart_disease: String,
        /// Average glucose level (mg/dL)
        #[arg(long)]
        avg_glucose_level: String,
        #[arg(long)]
        bmi: String,
        /// Male, Female or Other
        #[arg(long)]
        gender: String,
        /// Yes or No
        #[arg(long)]
        ever_married: String,
        /// Private, Self-employed, children, Never_worked or Govt_job
        #[arg(long)]
        work_type: String,
        /// Urban or Rural
        #[arg(long)]
        residence_type: String,
        /// formerly smoked, never smoked, smokes or Unknown
        #[arg(long)]
        smoking_status: String,
        /// Classifier artifact
        #[arg(long, default_value = DEFAULT_MODEL_PATH)]
        model: PathBuf,
        /// Scaler artifact
        #[arg(long, default_value = DEFAULT_SCALER_PATH)]
        scaler: PathBuf,
        /// Decision threshold (optional)
        #[arg(long)]
        threshold: Option<String>,
        /// Print the API JSON response instead of text
        #[arg(long)]
        json: bool,
    },
    /// Inspect model artifacts
    Artifacts {
        #[command(subcommand)]
        command: ArtifactCommands,
    },
    /// Ask the stroke awareness assistant a question
    Chat {
        message: String,
        /// Use the generative service configured by GOOGLE_GENAI_API_KEY
        #[arg(long)]
        generative: bool,
    },
}

#[derive(Subcommand)]
enum ArtifactCommands {
    /// Describe a classifier artifact
    Inspect {
        #[arg(long, default_value = DEFAULT_MODEL_PATH)]
        model: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Assess {
            age,
            hypertension,
            heart_disease,
            avg_glucose_level,
            bmi,
            gender,
            ever_married,
            work_type,
            residence_type,
            smoking_status,
            model,
            scaler,
            threshold,
            json,
        }) => {
            let form = AssessmentForm {
                age: Some(age.as_str().into()),
                hypertension: Some(hypertension.as_str().into()),
                heart_disease: Some(heart_disease.as_str().into()),
                avg_glucose_level: Some(avg_glucose_level.as_str().into()),
                bmi: Some(bmi.as_str().into()),
                gender: Some(gender.as_str().into()),
                ever_married: Some(ever_married.as_str().into()),
                work_type: Some(work_type.as_str().into()),
                residence_type: Some(residence_type.as_str().into()),
                smoking_status: Some(smoking_status.as_str().into()),
            };
            let config = scoring_config_from_env_value(threshold)?;
            let ctx = InferenceContext::load(config, &ArtifactPaths::new(model, scaler));

            match ctx.assess_form(&form) {
                Ok(assessment) if json => {
                    let res = AssessmentRes::from(&assessment);
                    println!("{}", serde_json::to_string_pretty(&res)?);
                }
                Ok(assessment) => {
                    println!(
                        "{} ({}%)",
                        assessment.label,
                        assessment.probability_percent()
                    );
                    if assessment.top_factors.is_empty() {
                        println!("No major risk factors identified.");
                    } else {
                        println!("Top risk factors:");
                        for factor in &assessment.top_factors {
                            println!(
                                "  - {}: {} (impact {})",
                                factor.name, factor.value, factor.impact
                            );
                        }
                    }
                }
                Err(e) => eprintln!("Error scoring assessment: {}", e),
            }
        }
        Some(Commands::Artifacts {
            command: ArtifactCommands::Inspect { model },
        }) => match load_classifier_artifact(&model) {
            Ok(artifact) => describe(&artifact),
            Err(e) => eprintln!("Error reading classifier artifact: {}", e),
        },
        Some(Commands::Chat {
            message,
            generative,
        }) => {
            let responder = if generative {
                let config = AdvisoryConfig::from_env_values(
                    std::env::var("GOOGLE_GENAI_API_KEY").ok(),
                    std::env::var("STROKE_GENAI_MODEL").ok(),
                    std::env::var("STROKE_GENAI_TIMEOUT_SECS").ok(),
                )?;
                AdvisoryResponder::from_config(&config)
            } else {
                AdvisoryResponder::new()
            };
            let runtime = tokio::runtime::Runtime::new()?;
            match runtime.block_on(responder.respond(&message)) {
                Ok(answer) => println!("{}", answer),
                Err(e) => eprintln!("Error: {}", e),
            }
        }
        None => {
            println!("Use 'stroke --help' for commands");
        }
    }

    Ok(())
}

/// Labels for the artifact's features: its own recorded names when present, which loading
/// has already checked against the encoder, otherwise the encoder order.
fn feature_labels(artifact: &ClassifierArtifact) -> Vec<&str> {
    match artifact.feature_names() {
        Some(names) => names.iter().map(String::as_str).collect(),
        None => FEATURE_NAMES.to_vec(),
    }
}

fn describe(artifact: &ClassifierArtifact) {
    let labels = feature_labels(artifact);
    match artifact {
        ClassifierArtifact::LogisticRegression(lr) => {
            println!("Kind: logistic regression");
            println!("Features: {}", lr.coef.len());
            println!("Intercept: {}", lr.intercept);
            println!("Coefficients:");
            for (name, coef) in labels.iter().zip(&lr.coef) {
                println!("  {:<32} {:>10.4}", name, coef);
            }
        }
        ClassifierArtifact::RandomForest(rf) => {
            println!("Kind: random forest");
            println!("Features: {}", rf.n_features);
            println!("Trees: {}", rf.trees.len());
            let nodes: usize = rf.trees.iter().map(|t| t.children_left.len()).sum();
            println!("Nodes: {}", nodes);
            println!("Feature names:");
            for name in &labels {
                println!("  {}", name);
            }
        }
    }
    if artifact.feature_names().is_none() {
        println!("Feature names not recorded in artifact; encoder order assumed.");
    }
}
