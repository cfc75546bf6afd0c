//! Monthly checklist example

use bigdecimal::BigDecimal;
use expense_checklist::utils::MemoryStorage;
use expense_checklist::{
    ChecklistStatus, MonthlyChecklist, ProductTransaction, ReconciliationConfig, Rule, RuleKind,
    RuleStore, ServiceTransaction, Transaction,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    println!("Recurring expenses - March 2024\n");

    let mut storage = MemoryStorage::new();

    // 1. Rule catalogue
    let rules = vec![
        Rule::new(
            "energy".to_string(),
            "Energia".to_string(),
            RuleKind::Service,
            "Acme".to_string(),
            "energia".to_string(),
            10,
        )
        .with_estimated_amount(BigDecimal::from(850)),
        Rule::new(
            "claro-movel".to_string(),
            "Claro Movel".to_string(),
            RuleKind::Service,
            "Acme".to_string(),
            "claro".to_string(),
            15,
        )
        .with_description("movel"),
        Rule::new(
            "claro-fibra".to_string(),
            "Claro Fibra".to_string(),
            RuleKind::Service,
            "Acme".to_string(),
            "claro".to_string(),
            15,
        )
        .with_description("fibra")
        .with_estimated_amount(BigDecimal::from(300)),
        Rule::new(
            "paper".to_string(),
            "Papel A4".to_string(),
            RuleKind::Product,
            "Acme".to_string(),
            "papel".to_string(),
            20,
        )
        .with_supplier("kalunga"),
    ];
    for rule in &rules {
        storage.save_rule(rule).await?;
    }

    // 2. Posted transactions
    storage.insert_transaction(Transaction::Service(ServiceTransaction {
        id: "svc-001".to_string(),
        company: Some("Acme".to_string()),
        service: Some("Energia Eletrica".to_string()),
        due_date: Some("10/03/2024".to_string()),
        amount: Some("812.40".to_string()),
        ..Default::default()
    }))?;
    storage.insert_transaction(Transaction::Service(ServiceTransaction {
        id: "svc-002".to_string(),
        company: Some("Acme".to_string()),
        service: Some("Claro".to_string()),
        service_description: Some("Linhas movel diretoria".to_string()),
        solicitation_date: Some("2024-03-04".to_string()),
        ..Default::default()
    }))?;
    storage.insert_transaction(Transaction::Product(ProductTransaction {
        id: "prd-001".to_string(),
        company: Some("Acme".to_string()),
        product: Some("Papel A4 Chamex".to_string()),
        supplier: Some("Kalunga".to_string()),
        due_date: Some("20/03/2024".to_string()),
        ..Default::default()
    }))?;

    let mut checklist = MonthlyChecklist::with_config(
        storage.clone(),
        storage,
        ReconciliationConfig::from_env(),
    );

    // 3. Checklist
    let month = checklist.summary(3, 2024).await?;
    for item in &month.results {
        let marker = match item.status {
            ChecklistStatus::Pendente => "PENDENTE",
            ChecklistStatus::Lancado => "LANCADO ",
        };
        println!(
            "  [{}] {} {}",
            marker,
            item.rule.label,
            item.matched_transaction_id.as_deref().unwrap_or("")
        );
    }
    println!(
        "\n  {} posted, {} pending (estimated {})\n",
        month.summary.lancado, month.summary.pendente, month.summary.estimated_pending_amount
    );

    // 4. Post everything still pending
    let pending: Vec<String> = month
        .results
        .iter()
        .filter(|r| r.is_pending())
        .map(|r| r.rule.id.clone())
        .collect();
    for rule_id in pending {
        let draft = checklist.draft_for(&rule_id, 3, 2024).await?;
        println!("  Posting {} -> {} ({})", rule_id, draft.description, draft.due_date);
        checklist.post_pending(&rule_id, 3, 2024).await?;
    }

    let month = checklist.summary(3, 2024).await?;
    println!(
        "\n  Checklist complete: {}",
        if month.summary.is_complete() { "yes" } else { "no" }
    );

    Ok(())
}
