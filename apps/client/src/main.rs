mod cli;

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use fairdeal_client::analytics::format::{format_lakhs, format_percent};
use fairdeal_client::client::AnalysisClient;
use fairdeal_client::config::Config;
use fairdeal_client::models::context::experience_label;
use fairdeal_client::models::Context;
use fairdeal_client::persistence::{ContextStore, FileContextStore};
use fairdeal_client::presentation::export::write_export;
use fairdeal_client::presentation::report::{
    FindingsPanel, NarrationPanel, PercentileCard, ReportView,
};
use fairdeal_client::presentation::ReportController;
use fairdeal_client::upload::SelectedFile;

use crate::cli::{Cli, Commands, ContextAction, KbAction};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = Config::from_env()?;
    if let Some(api_url) = cli.api_url {
        config.api_url = api_url.trim_end_matches('/').to_string();
    }

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("fairdeal_client={}", &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("FairDeal client v{} (service: {})", env!("CARGO_PKG_VERSION"), config.api_url);

    let store: Arc<dyn ContextStore> = Arc::new(FileContextStore::new(&config.state_dir));
    let client = AnalysisClient::from_config(&config)?;

    match cli.command {
        Commands::Analyze {
            file,
            role,
            experience,
            company_type,
            location,
            industry,
            export,
            summary,
        } => {
            let mut controller = ReportController::new(Arc::new(client), store)
                .with_max_upload_bytes(config.max_upload_bytes);

            controller.edit_context(|ctx| {
                if let Some(role) = role {
                    ctx.role = role;
                }
                if let Some(years) = experience {
                    ctx.set_experience_years(years);
                }
                if let Some(company_type) = company_type {
                    ctx.company_type = company_type.into();
                }
                if let Some(location) = location {
                    ctx.location = location;
                }
                if let Some(industry) = industry {
                    ctx.industry = industry;
                }
            });

            controller.select_file(SelectedFile::from_path(&file).await?)?;
            controller.analyze()?;
            controller
                .wait_for_settlement(|p| println!("[{:>3}%] {}", p.progress, p.message))
                .await;

            if let Some(message) = controller.phase().error_message() {
                anyhow::bail!("{message}");
            }
            let Some(report) = controller.report() else {
                anyhow::bail!("analysis finished without a result");
            };
            print_report(&report);

            if summary {
                if let Some(text) = controller.copy_summary() {
                    println!("\n{text}");
                }
            }
            if let (Some(dir), Some(result)) = (export, controller.result()) {
                let path = write_export(&dir, result).await?;
                println!("\nExported to {}", path.display());
            }
        }

        Commands::Context { action } => match action {
            ContextAction::Show => print_context(&store.read()),
            ContextAction::Reset => {
                let context = Context::default();
                store.write(&context);
                print_context(&context);
            }
        },

        Commands::Kb { action } => run_kb(&client, action).await?,
    }

    Ok(())
}

async fn run_kb(client: &AnalysisClient, action: KbAction) -> Result<()> {
    match action {
        KbAction::Health => {
            let health = client.kb_health().await?;
            println!(
                "store: {}\nprocessed: {}\nchunks: {}",
                health.chroma_path, health.processed_count, health.collection_count
            );
        }
        KbAction::Stats => {
            let stats = client.kb_stats().await?;
            println!("contracts: {}\nchunks: {}", stats.num_contracts, stats.num_chunks);
            for (clause_type, count) in &stats.clause_type_counts {
                println!("  {clause_type:<16} {count}");
            }
        }
        KbAction::Contracts { limit, offset } => {
            let page = client.kb_contracts(limit, offset).await?;
            for contract in &page.contracts {
                println!(
                    "{}  {}  {}",
                    contract.contract_id,
                    contract.filename,
                    contract.role.as_deref().unwrap_or("-")
                );
            }
            println!(
                "{}-{} of {}",
                page.offset,
                page.offset + page.contracts.len() as u64,
                page.total
            );
        }
        KbAction::Contract { id } => {
            let contract = client.kb_contract(&id).await?;
            println!("{}", serde_json::to_string_pretty(&contract)?);
        }
        KbAction::Chunks { id } => {
            for chunk in client.kb_contract_chunks(&id).await? {
                println!("[{}] {}", chunk.clause_type.as_str(), chunk.text_preview);
            }
        }
        KbAction::Search {
            query,
            clause_type,
            top_k,
        } => {
            for chunk in client.kb_search(&query, clause_type, top_k).await? {
                let similarity = chunk
                    .similarity
                    .map(|s| format!("{s:.2}"))
                    .unwrap_or_else(|| "-".to_string());
                println!(
                    "{similarity}  {} [{}] {}",
                    chunk.contract_id,
                    chunk.clause_type.as_str(),
                    chunk.text_preview
                );
            }
        }
    }
    Ok(())
}

fn print_context(context: &Context) {
    println!(
        "role: {}\nexperience: {}\ncompany type: {}\nlocation: {}\nindustry: {}",
        if context.has_role() { context.role.as_str() } else { "(not set)" },
        experience_label(context.experience_level),
        context.company_type.as_str(),
        context.location,
        context.industry
    );
}

fn print_report(report: &ReportView<'_>) {
    let score = &report.score;
    println!("\n{}", report.title);
    println!(
        "Score: {}/100  {} ({}), confidence {}",
        score.score_display,
        score.grade,
        score.band_label,
        format_percent(score.confidence_percent)
    );
    for item in score.breakdown {
        println!("  {:<24} {:>+6.1}  {}", item.factor, item.points, item.reason);
    }

    if let Some(salary) = &report.salary_display {
        println!("\nSalary: {salary}");
    }
    print_percentile("Salary percentile", &report.salary_percentile);
    print_percentile("Notice period percentile", &report.notice_percentile);
    if let Some(chart) = &report.distribution {
        println!(
            "Market: p25 {}  median {}  p75 {}  ({} contracts)",
            chart.p25_display, chart.median_display, chart.p75_display, chart.cohort_size
        );
        if let Some(you) = chart.you_x {
            println!("  you ≈ {}", format_lakhs(you));
        }
    }

    println!("\nRisk:");
    for cell in &report.heatmap {
        println!(
            "  {:<20} {:<14} {:<6} {:.0}",
            cell.label,
            cell.value_display,
            cell.assessment.tier.as_str(),
            cell.assessment.score
        );
    }

    match &report.findings {
        FindingsPanel::NoIssuesDetected => println!("\nNo issues detected."),
        FindingsPanel::Findings {
            red_flags,
            favorable_terms,
        } => {
            for flag in red_flags {
                println!("\n! [{}] {}: {}", flag.severity.as_str(), flag.rule, flag.explanation);
                println!("  → {}", flag.recommendation);
            }
            for term in favorable_terms.iter() {
                println!("\n+ {} ({}): {}", term.term, term.value, term.explanation);
            }
        }
    }

    if !report.negotiation.is_empty() {
        println!("\nNegotiation playbook:");
        for point in &report.negotiation {
            println!(
                "  {}. {}: {} → {} ({})",
                point.priority,
                point.topic,
                point.current_term,
                point.target_term,
                String::from(point.success_probability)
            );
            println!("     \"{}\"", point.script);
        }
    }

    match &report.narration {
        NarrationPanel::Summary { text, .. } => println!("\n{text}"),
        NarrationPanel::NotAvailable => {}
    }

    let timings: Vec<String> = report
        .timings
        .iter()
        .map(|(label, value)| format!("{label} {value}"))
        .collect();
    println!("\n{}", timings.join(" · "));
}

fn print_percentile(label: &str, card: &PercentileCard) {
    match card {
        PercentileCard::Available {
            rank,
            interpretation,
            insight,
            ..
        } => {
            println!("{label}: {rank} ({})", interpretation.label());
            if !insight.is_empty() {
                println!("  {insight}");
            }
        }
        PercentileCard::NotAvailable => println!("{label}: not available"),
    }
}
