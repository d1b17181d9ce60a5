//! vpc-stack: declares a VPC with public/private subnets on AWS
//!
//! `up` provisions the stack through EC2; `plan` runs the same build
//! against an in-memory provisioner and prints what would be created.

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing::info;
use vpc_stack::aws::{AwsContext, Ec2Client, classify_anyhow_error};
use vpc_stack::plan::Registration;
use vpc_stack::{PlanProvisioner, StackConfig, StackOutputs, build_stack};
use vpc_stack_common::Ipv4Cidr;
use vpc_stack_common::defaults::{
    DEFAULT_AVAILABILITY_ZONE, DEFAULT_PRIVATE_SUBNET_CIDR, DEFAULT_PUBLIC_SUBNET_CIDR,
    DEFAULT_REGION, DEFAULT_VPC_CIDR, DEFAULT_VPC_NAME,
};

#[derive(Parser, Debug)]
#[command(name = "vpc-stack")]
#[command(about = "Declare a VPC with public and private subnets on AWS")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

/// Stack layout flags shared by every command
#[derive(clap::Args, Debug)]
struct StackArgs {
    /// AWS region
    #[arg(long, default_value = DEFAULT_REGION)]
    region: String,

    /// Availability zone for both subnets
    #[arg(long, default_value = DEFAULT_AVAILABILITY_ZONE)]
    availability_zone: String,

    /// VPC name, also used as the stack tag
    #[arg(long, default_value = DEFAULT_VPC_NAME)]
    vpc_name: String,

    /// VPC CIDR block
    #[arg(long, default_value = DEFAULT_VPC_CIDR)]
    vpc_cidr: Ipv4Cidr,

    /// Public subnet CIDR block
    #[arg(long, default_value = DEFAULT_PUBLIC_SUBNET_CIDR)]
    public_subnet_cidr: Ipv4Cidr,

    /// Private subnet CIDR block
    #[arg(long, default_value = DEFAULT_PRIVATE_SUBNET_CIDR)]
    private_subnet_cidr: Ipv4Cidr,
}

impl From<StackArgs> for StackConfig {
    fn from(args: StackArgs) -> Self {
        Self {
            region: args.region,
            availability_zone: args.availability_zone,
            vpc_name: args.vpc_name,
            vpc_cidr: args.vpc_cidr,
            public_subnet_cidr: args.public_subnet_cidr,
            private_subnet_cidr: args.private_subnet_cidr,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum PlanFormat {
    Table,
    Json,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create the stack on AWS
    Up {
        #[command(flatten)]
        stack: StackArgs,

        /// AWS profile to use (overrides AWS_PROFILE env var)
        #[arg(long)]
        aws_profile: Option<String>,

        /// Write the outputs to this JSON file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show what would be created, without calling AWS
    Plan {
        #[command(flatten)]
        stack: StackArgs,

        /// Output format
        #[arg(long, value_enum, default_value = "table")]
        format: PlanFormat,
    },
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        print_error(&e);
        std::process::exit(1);
    }
}

/// Print error in a user-friendly way
fn print_error(e: &anyhow::Error) {
    use std::io::Write;

    let mut stderr = std::io::stderr();

    let _ = writeln!(stderr, "\n\x1b[1;31mError:\x1b[0m {e}");

    let mut source = e.source();
    while let Some(cause) = source {
        let _ = writeln!(stderr, "  \x1b[33mCaused by:\x1b[0m {cause}");
        source = cause.source();
    }

    if let Some(suggestion) = classify_anyhow_error(e).suggestion() {
        let _ = writeln!(stderr, "\n\x1b[36mHint:\x1b[0m {suggestion}");
    }

    if std::env::var("RUST_BACKTRACE").is_err() {
        let _ = writeln!(
            stderr,
            "\n\x1b[2mSet RUST_BACKTRACE=1 for a detailed backtrace\x1b[0m"
        );
    } else {
        let backtrace = e.backtrace();
        if backtrace.status() == std::backtrace::BacktraceStatus::Captured {
            let _ = writeln!(stderr, "\n\x1b[2mBacktrace:\x1b[0m\n{backtrace}");
        }
    }
}

async fn run() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    match args.command {
        Command::Up {
            stack,
            aws_profile,
            output,
        } => handle_up(stack.into(), aws_profile, output).await,
        Command::Plan { stack, format } => handle_plan(stack.into(), format).await,
    }
}

/// Handle the up command
async fn handle_up(
    config: StackConfig,
    aws_profile: Option<String>,
    output: Option<PathBuf>,
) -> Result<()> {
    config.validate()?;
    if let Some(profile) = &aws_profile {
        info!(profile = %profile, "Using AWS profile");
    }

    let aws = AwsContext::with_profile(&config.region, aws_profile.as_deref()).await;
    let ec2 = Ec2Client::from_context(&aws, config.vpc_name.clone());

    let outputs = build_stack(&config, &ec2).await?;
    print_outputs(&outputs);

    if let Some(path) = output {
        outputs.write_json(&path)?;
        info!(path = %path.display(), "Wrote stack outputs");
    }
    Ok(())
}

/// Handle the plan command
async fn handle_plan(config: StackConfig, format: PlanFormat) -> Result<()> {
    let plan = PlanProvisioner::new();
    let outputs = build_stack(&config, &plan).await?;
    let registrations = plan.registrations();

    match format {
        PlanFormat::Json => {
            let json = plan_json(&registrations, &outputs);
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        PlanFormat::Table => {
            print_registrations(&registrations);
            println!();
            print_outputs(&outputs);
        }
    }
    Ok(())
}

/// JSON document printed by `plan --format json`
fn plan_json(registrations: &[Registration], outputs: &StackOutputs) -> serde_json::Value {
    serde_json::json!({
        "registrations": registrations,
        "outputs": outputs,
    })
}

fn print_registrations(registrations: &[Registration]) {
    println!(
        "{:<4} {:<26} {:<32} {:<22}",
        "STEP", "KIND", "NAME", "ID"
    );
    println!("{}", "-".repeat(86));
    for (step, r) in registrations.iter().enumerate() {
        println!(
            "{:<4} {:<26} {:<32} {:<22}",
            step + 1,
            r.kind.to_string(),
            r.name,
            r.id.as_str()
        );
    }
}

fn print_outputs(outputs: &StackOutputs) {
    for (key, value) in outputs.entries() {
        println!("{key:<16} {value}");
    }
}
