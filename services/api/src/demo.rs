use crate::infra::{InMemoryLeadStore, TemplateEmailGateway};
use clap::Args;
use leadflow::error::AppError;
use leadflow::workflows::campaign::{CampaignRequest, CampaignService, UniformPicker};
use leadflow::workflows::leads::{
    CustomerType, IntentQuestions, LeadSubmission, PriorityTier, PropertyType,
    SentimentQuestions, SpecificProperty,
};
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Dispatch through the gateway transport instead of a dry run.
    #[arg(long)]
    pub(crate) live: bool,
    /// Skip the per-tier preview portion of the demo output.
    #[arg(long)]
    pub(crate) skip_previews: bool,
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        live,
        skip_previews,
    } = args;

    let service = Arc::new(CampaignService::new(
        Arc::new(InMemoryLeadStore::default()),
        Arc::new(TemplateEmailGateway),
        UniformPicker,
    ));

    println!("Lead campaign demo");
    println!("\nIntake");
    for submission in sample_submissions() {
        let view = service.submit_lead(submission)?;
        println!(
            "- {} ({}) | tier: {} | {} / {} {}",
            view.lead.name,
            view.lead.location,
            view.tier.unwrap_or("unclassified"),
            view.classification.price_range.label(),
            match view.classification.customer_type {
                CustomerType::Targeted => "targeted",
                CustomerType::General => "general",
            },
            if view.classification.vip { "| VIP" } else { "" }
        );
    }

    let counts = service.counts()?;
    println!("\nSegmentation");
    println!(
        "- high: {} | medium: {} | low: {} | total classified: {}",
        counts.high, counts.medium, counts.low, counts.total
    );

    if !skip_previews {
        println!("\nPreviews");
        for tier in PriorityTier::ALL {
            match service.preview(tier)? {
                Some(preview) => println!(
                    "- {} tier -> {} template for {}",
                    tier.label(),
                    preview.email_type.label(),
                    preview.lead.name
                ),
                None => println!("- {} tier -> no leads available", tier.label()),
            }
        }
    }

    let result = service.run_campaign(CampaignRequest {
        test_mode: !live,
        ..CampaignRequest::default()
    })?;

    println!(
        "\nCampaign run ({})",
        if result.test_mode { "test mode" } else { "live" }
    );
    println!(
        "- status: {} | sent: {} | failed: {}",
        result.status.label(),
        result.successful,
        result.failed
    );
    for detail in &result.details {
        println!(
            "  - {} <{}> | {} | {}",
            detail.name,
            detail.email,
            detail.email_type,
            if detail.success { "delivered" } else { "failed" }
        );
    }

    Ok(())
}

fn sample_submissions() -> Vec<LeadSubmission> {
    let base = |name: &str, email: &str, location: &str, budget: u64| LeadSubmission {
        id: None,
        name: name.to_string(),
        email: email.to_string(),
        phone: "+91-98765-43210".to_string(),
        budget,
        property_type: PropertyType::Apartment,
        location: location.to_string(),
        urgency: 3,
        specific_property: SpecificProperty::No,
        intent_questions: IntentQuestions::default(),
        sentiment_questions: SentimentQuestions::default(),
        lead_score: Some(3),
    };

    let mut delhi_vip = base("Asha Verma", "asha.verma@example.com", "Delhi", 250_000);
    delhi_vip.lead_score = Some(5);
    delhi_vip.urgency = 5;
    delhi_vip.specific_property = SpecificProperty::Yes;
    delhi_vip.property_type = PropertyType::Penthouse;

    let mut mumbai_premium = base("Rohan Mehta", "rohan.mehta@example.com", "Mumbai", 150_000);
    mumbai_premium.lead_score = Some(4);
    mumbai_premium.property_type = PropertyType::Villa;

    let pune_mid = base("Priya Nair", "priya.nair@example.com", "Pune", 80_000);

    let mut jaipur_budget = base("Vikram Singh", "vikram.singh@example.com", "Jaipur", 40_000);
    jaipur_budget.lead_score = Some(1);

    let mut unscored = base("Neha Kulkarni", "neha.kulkarni@example.com", "Hyderabad", 60_000);
    unscored.lead_score = None;

    vec![delhi_vip, mumbai_premium, pune_mid, jaipur_budget, unscored]
}
