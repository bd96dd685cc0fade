use clap::Args;
use sem_lite::ads::{CustomerId, DemoAdsClient};
use sem_lite::error::AppError;
use sem_lite::workflows::dashboard::{score_records, DashboardService, ScorecardReport};
use sem_lite::workflows::import::ReportImporter;
use sem_lite::workflows::kpi::{DataAssessment, KpiResult, PriorityAction};
use std::fmt::Write as _;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Campaign report export (CSV)
    #[arg(long)]
    pub(crate) campaigns: PathBuf,
    /// Ad group report export (CSV)
    #[arg(long)]
    pub(crate) ad_groups: Option<PathBuf>,
    #[command(flatten)]
    pub(crate) assessment: AssessmentArgs,
    /// Print the scorecard as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Demo account to score (defaults to the first demo account)
    #[arg(long)]
    pub(crate) customer_id: Option<String>,
    #[command(flatten)]
    pub(crate) assessment: AssessmentArgs,
    /// Print the scorecard as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default, Clone, Copy)]
pub(crate) struct AssessmentArgs {
    /// GA4 maturity level (0 not implemented .. 3 primary bid source)
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=3))]
    pub(crate) ga4_level: Option<u8>,
    /// First-party data level (0 not used .. 3 CDP/API integration)
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=3))]
    pub(crate) first_party_level: Option<u8>,
}

impl AssessmentArgs {
    pub(crate) fn assessment(self) -> Result<Option<DataAssessment>, AppError> {
        match (self.ga4_level, self.first_party_level) {
            (None, None) => Ok(None),
            (ga4, first_party) => Ok(Some(DataAssessment::from_levels(
                ga4.unwrap_or(0),
                first_party.unwrap_or(0),
            )?)),
        }
    }
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let ScoreArgs {
        campaigns,
        ad_groups,
        assessment,
        json,
    } = args;

    let campaigns = ReportImporter::campaigns_from_path(campaigns)?;
    let ad_groups = match ad_groups {
        Some(path) => ReportImporter::ad_groups_from_path(path)?,
        None => Vec::new(),
    };

    let report = score_records(&campaigns, &ad_groups, assessment.assessment()?);
    print_report(&report, json)
}

pub(crate) async fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        customer_id,
        assessment,
        json,
    } = args;

    let service = DashboardService::new(Arc::new(DemoAdsClient::new()))
        .with_default_customer(CustomerId::parse(DemoAdsClient::DEFAULT_CUSTOMER));

    if !json {
        println!("Search marketing maturity demo (built-in fixture)");
        println!("\nAccessible accounts");
        for account in service.accounts().await? {
            println!("- {} ({})", account.name, account.id);
        }
    }

    let customer_id = customer_id.as_deref().and_then(CustomerId::parse);
    let report = service
        .scorecard(customer_id, assessment.assessment()?)
        .await?;
    print_report(&report, json)
}

fn print_report(report: &ScorecardReport, json: bool) -> Result<(), AppError> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        print!("{}", render_scorecard(report));
    }
    Ok(())
}

pub(crate) fn render_scorecard(report: &ScorecardReport) -> String {
    let mut out = String::new();
    let scorecard = &report.scorecard;

    match &report.customer_id {
        Some(customer_id) => {
            let _ = writeln!(out, "\nScorecard for account {customer_id}");
        }
        None => {
            let _ = writeln!(out, "\nScorecard");
        }
    }
    write_kpi(&mut out, "Naming gatekeeper", &scorecard.gatekeeper);
    match &scorecard.coverage {
        Some(coverage) => write_kpi(&mut out, "Brand coverage", coverage),
        None => {
            let _ = writeln!(out, "- Brand coverage: hidden until naming passes");
        }
    }
    write_kpi(&mut out, "Creative quality", &scorecard.quality);
    write_kpi(&mut out, "AI bidding adoption", &scorecard.ai_adoption);
    write_kpi(&mut out, "Data maturity", &scorecard.data);

    if report.priorities.is_empty() {
        let _ = writeln!(out, "\nPriority actions: none");
    } else {
        write_actions(&mut out, "Coverage fixes", &report.priorities.coverage);
        write_actions(&mut out, "Creative fixes", &report.priorities.quality);
        write_actions(&mut out, "Bidding upgrades", &report.priorities.ai_adoption);
    }

    out
}

fn write_kpi(out: &mut String, label: &str, result: &KpiResult) {
    let _ = writeln!(
        out,
        "- {label}: {} ({})",
        result.score,
        result.status.label()
    );
}

fn write_actions(out: &mut String, heading: &str, actions: &[PriorityAction]) {
    if actions.is_empty() {
        return;
    }
    let _ = writeln!(out, "\n{heading}");
    for action in actions {
        let _ = writeln!(
            out,
            "- {} [{} {}] -> {}",
            action.entity_name, action.metric_label, action.metric_value, action.action
        );
    }
}
