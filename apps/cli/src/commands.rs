//! Command execution
//!
//! Every command returns the text to print. Single-record and report
//! commands fail with context; the dashboard renders failed panels inline.

use anyhow::Context;
use rxboard_client::{CachedResource, ListController, Resource, RxClient};
use rxboard_models::{
    ClaimQuery, DateRange, DrugQuery, MemberDraft, MemberQuery, Page, PageRequest, PharmacyQuery,
};
use serde::Serialize;

use crate::cli::{
    ClaimsCommand, Command, DrugsCommand, MembersCommand, NewMember, Paging, PharmaciesCommand,
};
use crate::dashboard::DashboardScreen;
use crate::reports;

/// Output mode chosen on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Output {
    Table,
    Json,
}

impl Output {
    fn emit<T: Serialize + ?Sized>(
        self,
        value: &T,
        table: impl FnOnce(&T) -> String,
    ) -> anyhow::Result<String> {
        match self {
            Output::Table => Ok(table(value)),
            Output::Json => {
                let mut json =
                    serde_json::to_string_pretty(value).context("Failed to encode output")?;
                json.push('\n');
                Ok(json)
            }
        }
    }
}

impl From<Paging> for PageRequest {
    fn from(paging: Paging) -> Self {
        PageRequest::new(paging.page, paging.per_page)
    }
}

pub async fn run(client: &RxClient, command: Command, output: Output) -> anyhow::Result<String> {
    match command {
        Command::Claims(command) => claims(client, command, output).await,
        Command::Members(command) => members(client, command, output).await,
        Command::Drugs(command) => drugs(client, command, output).await,
        Command::Pharmacies(command) => pharmacies(client, command, output).await,
        Command::Dashboard(window) => dashboard(client, window.days, output).await,
        Command::Trends(window) => {
            let report = client
                .analytics()
                .trends(window.days)
                .await
                .context("Failed to load cost trends")?;
            output.emit(report.as_ref(), reports::trends_section)
        }
        Command::Utilizers { days, min_claims } => {
            let report = client
                .analytics()
                .high_utilizers(days.days, min_claims)
                .await
                .context("Failed to load high utilizers")?;
            output.emit(report.as_ref(), reports::utilizers_section)
        }
        Command::Savings(window) => {
            let report = client
                .analytics()
                .generic_savings(window.days)
                .await
                .context("Failed to load generic savings report")?;
            output.emit(report.as_ref(), reports::savings_section)
        }
        Command::CostSummary { from, to } => {
            let range = match (from, to) {
                (Some(from), Some(to)) => {
                    Some(DateRange::new(from, to).context("Invalid report period")?)
                }
                _ => None,
            };
            let report = client
                .analytics()
                .cost_summary(range)
                .await
                .context("Failed to load cost summary")?;
            output.emit(report.as_ref(), reports::cost_summary_section)
        }
        Command::MemberSummary { id, days } => {
            let report = client
                .analytics()
                .member_summary(id, days.days)
                .await
                .with_context(|| format!("Failed to load summary for member {id}"))?;
            output.emit(report.as_ref(), reports::member_summary_section)
        }
        Command::PharmacyPerformance(window) => {
            let report = client
                .analytics()
                .pharmacy_performance(window.days)
                .await
                .context("Failed to load pharmacy performance")?;
            output.emit(report.as_ref(), reports::pharmacy_performance_section)
        }
        Command::TherapeuticClasses(window) => {
            let report = client
                .analytics()
                .therapeutic_classes(window.days)
                .await
                .context("Failed to load therapeutic class breakdown")?;
            output.emit(report.as_ref(), reports::therapeutic_class_section)
        }
    }
}

/// Load one page through a [`ListController`], as a list screen would
async fn load_list<R>(
    resource: &CachedResource<R>,
    query: R::Query,
) -> anyhow::Result<ListController<R>>
where
    R: Resource,
{
    let mut list = ListController::<R>::new(query);
    let pending = list.refresh();
    let result = resource.list(&pending.query).await;
    list.apply(pending.ticket, result);

    if let Some(error) = list.view().error() {
        return Err(error.clone()).with_context(|| format!("Failed to load {}", R::NAME));
    }
    Ok(list)
}

fn emit_list<R>(
    list: &ListController<R>,
    output: Output,
    table: fn(&Page<R>) -> String,
) -> anyhow::Result<String>
where
    R: Resource + Serialize,
{
    let page = list
        .view()
        .data()
        .with_context(|| format!("No {} page was loaded", R::NAME))?;
    tracing::debug!(
        resource = R::NAME,
        page = page.current_page,
        pages = page.pages,
        total = page.total,
        "Loaded list page"
    );
    output.emit(page, table)
}

async fn claims(client: &RxClient, command: ClaimsCommand, output: Output) -> anyhow::Result<String> {
    let claims = client.claims();
    match command {
        ClaimsCommand::List {
            paging,
            status,
            member,
            from,
            to,
        } => {
            let query = ClaimQuery {
                page: paging.into(),
                status,
                member_id: member,
                start_date: from,
                end_date: to,
            };
            let list = load_list(&claims, query).await?;
            emit_list(&list, output, reports::claims_page)
        }
        ClaimsCommand::Get { id } => {
            let claim = claims
                .get(id)
                .await
                .with_context(|| format!("Failed to load claim {id}"))?;
            output.emit(claim.as_ref(), reports::claim_detail)
        }
        ClaimsCommand::SetStatus { id, status } => {
            let claim = claims
                .update_status(id, status)
                .await
                .with_context(|| format!("Failed to set claim {id} to {}", status.as_str()))?;
            tracing::info!(claim_id = id, status = status.as_str(), "Claim status updated");
            output.emit(&claim, reports::claim_detail)
        }
    }
}

async fn members(
    client: &RxClient,
    command: MembersCommand,
    output: Output,
) -> anyhow::Result<String> {
    let members = client.members();
    match command {
        MembersCommand::List {
            paging,
            search,
            active,
        } => {
            let query = MemberQuery {
                page: paging.into(),
                search,
                is_active: active,
            };
            let list = load_list(&members, query).await?;
            emit_list(&list, output, reports::members_page)
        }
        MembersCommand::Get { id } => {
            let member = members
                .get(id)
                .await
                .with_context(|| format!("Failed to load member {id}"))?;
            output.emit(member.as_ref(), reports::member_detail)
        }
        MembersCommand::Claims { id, paging } => {
            let page = members
                .claims(id, paging.into())
                .await
                .with_context(|| format!("Failed to load claims for member {id}"))?;
            output.emit(page.as_ref(), reports::claims_page)
        }
        MembersCommand::Create(new) => {
            let member = members
                .create(&member_draft(new))
                .await
                .context("Failed to create member")?;
            tracing::info!(id = member.id, member_id = %member.member_id, "Member created");
            output.emit(&member, reports::member_detail)
        }
    }
}

fn member_draft(new: NewMember) -> MemberDraft {
    MemberDraft {
        member_id: Some(new.member_id),
        first_name: Some(new.first_name),
        last_name: Some(new.last_name),
        date_of_birth: new.date_of_birth,
        gender: new.gender,
        email: new.email,
        phone: new.phone,
        plan_type: new.plan_type,
        group_id: new.group_id,
        ..Default::default()
    }
}

async fn drugs(client: &RxClient, command: DrugsCommand, output: Output) -> anyhow::Result<String> {
    let drugs = client.drugs();
    match command {
        DrugsCommand::List {
            paging,
            search,
            generic,
            therapeutic_class,
        } => {
            let query = DrugQuery {
                page: paging.into(),
                search,
                is_generic: generic,
                therapeutic_class,
            };
            let list = load_list(&drugs, query).await?;
            emit_list(&list, output, reports::drugs_page)
        }
        DrugsCommand::Get { id } => {
            let drug = drugs
                .get(id)
                .await
                .with_context(|| format!("Failed to load drug {id}"))?;
            output.emit(drug.as_ref(), reports::drug_detail)
        }
        DrugsCommand::Search { query, limit } => {
            let results = drugs
                .search(&query, limit)
                .await
                .with_context(|| format!("Drug search for {query:?} failed"))?;
            output.emit(results.as_slice(), |found| {
                if found.is_empty() {
                    "No matching drugs.\n".to_string()
                } else {
                    reports::drug_rows(found).render()
                }
            })
        }
    }
}

async fn pharmacies(
    client: &RxClient,
    command: PharmaciesCommand,
    output: Output,
) -> anyhow::Result<String> {
    let pharmacies = client.pharmacies();
    match command {
        PharmaciesCommand::List {
            paging,
            search,
            city,
            state,
            in_network,
        } => {
            let query = PharmacyQuery {
                page: paging.into(),
                search,
                city,
                state,
                in_network,
            };
            let list = load_list(&pharmacies, query).await?;
            emit_list(&list, output, reports::pharmacies_page)
        }
        PharmaciesCommand::Get { id } => {
            let pharmacy = pharmacies
                .get(id)
                .await
                .with_context(|| format!("Failed to load pharmacy {id}"))?;
            output.emit(pharmacy.as_ref(), reports::pharmacy_detail)
        }
    }
}

async fn dashboard(client: &RxClient, days: Option<u32>, output: Output) -> anyhow::Result<String> {
    let mut screen = DashboardScreen::new();
    screen.load(client, days).await;

    if screen.failures() > 0 {
        tracing::warn!(failed = screen.failures(), "Some dashboard panels failed to load");
    }

    match output {
        Output::Table => Ok(screen.render()),
        Output::Json => {
            // Failed panels become null
            let value = serde_json::json!({
                "stats": screen.stats.data(),
                "trends": screen.trends.data(),
                "high_utilizers": screen.utilizers.data(),
                "generic_savings": screen.savings.data(),
            });
            let mut json = serde_json::to_string_pretty(&value).context("Failed to encode output")?;
            json.push('\n');
            Ok(json)
        }
    }
}
