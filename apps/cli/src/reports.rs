//! Text sections for records and analytics payloads
//!
//! Each function takes already-loaded data and derives its rows through
//! `rxboard_views`; none of them fail.

use rxboard_models::{
    Claim, CostSummaryReport, DashboardStats, Drug, GenericBrandRow, GenericSavings,
    HighUtilizers, Member, MemberSummary, Page, Pharmacy, PharmacyPerformance, StatusCount,
    TherapeuticClassBreakdown, TopDrug, TrendReport,
};
use rxboard_views::{
    cost_summary_view, format_count, format_currency, format_percent, format_trends,
    savings_overview, split_generic_brand, stats_cards, status_breakdown, top_drugs,
    utilizer_rows, ChartSeries, SplitMeasure, TopDrugSeries, TrendSeries, DEFAULT_TOP_N,
};

use crate::render::{or_dash, page_footer, yes_no, Table};

pub fn stats_section(stats: &DashboardStats) -> String {
    let mut table = Table::new(["Metric", "Value", ""]);
    for card in stats_cards(&stats.summary, stats.period_days) {
        table.row([card.title.to_string(), card.value, card.description]);
    }
    table.render()
}

pub fn status_section(rows: &[StatusCount]) -> String {
    let slices = status_breakdown(rows);
    if slices.is_empty() {
        return "No claims in this period.\n".to_string();
    }

    let mut table = Table::new(["Status", "Claims", "Color"]);
    for slice in &slices {
        table.row([slice.status.clone(), slice.tooltip(), slice.tone.color().to_string()]);
    }
    table.render()
}

pub fn split_section(rows: &[GenericBrandRow]) -> String {
    let split = split_generic_brand(rows);
    let mut out = format!("{}\n", split.caption());

    let mut table = Table::new(["Category", "Claims", "Cost", "Claim share", "Cost share"]);
    for slice in &split.slices {
        table.row([
            slice.category.as_str().to_string(),
            SplitMeasure::Claims.format_value(slice.claims as f64),
            SplitMeasure::Cost.format_value(slice.cost),
            slice.label(SplitMeasure::Claims),
            slice.label(SplitMeasure::Cost),
        ]);
    }
    if !table.is_empty() {
        out.push_str(&table.render());
    }
    out
}

pub fn top_drugs_section(drugs: &[TopDrug]) -> String {
    let rows = top_drugs(drugs, DEFAULT_TOP_N);
    if rows.is_empty() {
        return "No drug utilization in this period.\n".to_string();
    }

    let mut table = Table::new(["#", "Drug", "Type", "Claims", "Total Cost"]);
    for row in &rows {
        table.row([
            row.rank.to_string(),
            row.name.clone(),
            row.kind().to_string(),
            TopDrugSeries::Claims.format_value(row.value(TopDrugSeries::Claims)),
            TopDrugSeries::TotalCost.format_value(row.value(TopDrugSeries::TotalCost)),
        ]);
    }
    table.render()
}

pub fn trends_section(report: &TrendReport) -> String {
    let points = format_trends(&report.trends);
    if points.is_empty() {
        return format!("No claims in the last {} days.\n", report.period_days);
    }

    let mut table = Table::new(
        std::iter::once("Date").chain(TrendSeries::ALL.iter().map(|s| s.label())),
    );
    for point in &points {
        let cells = TrendSeries::ALL
            .iter()
            .map(|series| series.format_value(point.value(*series)));
        table.row(std::iter::once(point.label.clone()).chain(cells));
    }
    table.render()
}

pub fn utilizers_section(report: &HighUtilizers) -> String {
    let rows = utilizer_rows(&report.high_utilizers);
    if rows.is_empty() {
        return format!(
            "No members with {}+ claims in the last {} days.\n",
            report.min_claims, report.period_days
        );
    }

    let mut table = Table::new(["Member", "Name", "Claims", "Total Cost", "Avg/Claim", "Risk"]);
    for row in rows {
        table.row([
            row.member_id,
            row.name,
            format_count(row.claim_count),
            row.total_cost,
            row.avg_cost_per_claim,
            row.risk.as_str().to_string(),
        ]);
    }
    table.render()
}

pub fn savings_section(report: &GenericSavings) -> String {
    let overview = savings_overview(report);
    let mut out = format!(
        "{} potential savings across {} opportunities ({} days)\n",
        overview.total_potential_savings, overview.opportunity_count, overview.period_days
    );

    let mut table = Table::new([
        "Brand",
        "Generic",
        "Brand Claims",
        "Avg Brand",
        "Avg Generic",
        "Savings/Claim",
        "Potential",
    ]);
    for row in overview.rows {
        table.row([
            row.brand_name,
            row.generic_name,
            row.brand_claims,
            row.avg_brand_cost,
            row.avg_generic_cost,
            row.savings_per_claim,
            row.potential_savings,
        ]);
    }
    if !table.is_empty() {
        out.push_str(&table.render());
    }
    out
}

pub fn cost_summary_section(report: &CostSummaryReport) -> String {
    let view = cost_summary_view(report);
    let mut out = format!("Period: {}\n", view.period);

    let mut overall = Table::new(["Claims", "Total Cost", "Plan Paid", "Member Paid", "Average"]);
    overall.row([
        view.total_claims,
        view.total_cost,
        view.plan_paid,
        view.member_paid,
        view.average_cost,
    ]);
    out.push_str(&overall.render());

    if !view.by_status.is_empty() {
        let mut table = Table::new(["Status", "Claims", "Cost"]);
        for row in view.by_status {
            table.row([row.status, row.claims, row.cost]);
        }
        out.push('\n');
        out.push_str(&table.render());
    }

    if !view.months.is_empty() {
        let mut table = Table::new(["Month", "Claims", "Cost"]);
        for row in view.months {
            table.row([row.label, row.claims, row.cost]);
        }
        out.push('\n');
        out.push_str(&table.render());
    }
    out
}

pub fn member_summary_section(report: &MemberSummary) -> String {
    let member = &report.member;
    let summary = &report.summary;
    let mut out = format!(
        "{} ({}), last {} days\n",
        member.full_name(),
        member.member_id,
        report.period_days
    );

    let mut totals = Table::new(["Claims", "Total Cost", "Copay", "Avg/Claim"]);
    totals.row([
        format_count(summary.total_claims),
        format_currency(summary.total_cost),
        format_currency(summary.total_copay),
        format_currency(summary.avg_cost_per_claim),
    ]);
    out.push_str(&totals.render());

    if !report.most_used_drugs.is_empty() {
        let mut table = Table::new(["Drug", "Generic", "Fills", "Total Cost"]);
        for drug in &report.most_used_drugs {
            table.row([
                drug.name.clone(),
                yes_no(drug.is_generic).to_string(),
                format_count(drug.fills),
                format_currency(drug.total_cost),
            ]);
        }
        out.push('\n');
        out.push_str(&table.render());
    }

    if !report.recent_claims.is_empty() {
        out.push('\n');
        out.push_str(&claim_rows(&report.recent_claims).render());
    }
    out
}

pub fn pharmacy_performance_section(report: &PharmacyPerformance) -> String {
    if report.pharmacies.is_empty() {
        return format!("No pharmacy activity in the last {} days.\n", report.period_days);
    }

    let mut table = Table::new(["Pharmacy", "Chain", "Tier", "Claims", "Total Cost", "Avg", "Denial Rate"]);
    for row in &report.pharmacies {
        table.row([
            row.name.clone(),
            or_dash(row.chain.as_deref()),
            or_dash(row.network_tier.as_deref()),
            format_count(row.claims),
            format_currency(row.total_cost),
            format_currency(row.avg_cost),
            format_percent(row.denial_rate, 1),
        ]);
    }
    table.render()
}

pub fn therapeutic_class_section(report: &TherapeuticClassBreakdown) -> String {
    if report.therapeutic_classes.is_empty() {
        return format!("No claims in the last {} days.\n", report.period_days);
    }

    let mut table = Table::new(["Class", "Claims", "Members", "Total Cost", "Avg/Claim"]);
    for row in &report.therapeutic_classes {
        table.row([
            row.class_name.clone(),
            format_count(row.claims),
            format_count(row.unique_members),
            format_currency(row.total_cost),
            format_currency(row.avg_cost_per_claim),
        ]);
    }
    table.render()
}

fn claim_rows(claims: &[Claim]) -> Table {
    let mut table = Table::new(["ID", "Claim #", "Member", "Drug", "Fill Date", "Status", "Total"]);
    for claim in claims {
        table.row([
            claim.id.to_string(),
            claim.claim_number.clone(),
            claim
                .member_name
                .clone()
                .unwrap_or_else(|| claim.member_id.to_string()),
            claim
                .drug_name
                .clone()
                .unwrap_or_else(|| claim.drug_id.to_string()),
            claim
                .fill_date
                .map(|d| d.to_string())
                .unwrap_or_else(|| "-".to_string()),
            claim.status.as_str().to_string(),
            format_currency(claim.total_cost()),
        ]);
    }
    table
}

pub fn claims_page(page: &Page<Claim>) -> String {
    with_footer(claim_rows(&page.items), page)
}

pub fn members_page(page: &Page<Member>) -> String {
    let mut table = Table::new(["ID", "Member ID", "Name", "Plan", "Active"]);
    for member in &page.items {
        table.row([
            member.id.to_string(),
            member.member_id.clone(),
            member.full_name(),
            or_dash(member.plan_type.as_deref()),
            yes_no(member.is_active).to_string(),
        ]);
    }
    with_footer(table, page)
}

pub fn drugs_page(page: &Page<Drug>) -> String {
    with_footer(drug_rows(&page.items), page)
}

pub fn drug_rows(drugs: &[Drug]) -> Table {
    let mut table = Table::new(["ID", "NDC", "Name", "Strength", "Class", "Generic", "AWP"]);
    for drug in drugs {
        table.row([
            drug.id.to_string(),
            drug.ndc.clone(),
            drug.name.clone(),
            or_dash(drug.strength.as_deref()),
            or_dash(drug.therapeutic_class.as_deref()),
            yes_no(drug.is_generic).to_string(),
            drug.awp.map(format_currency).unwrap_or_else(|| "-".to_string()),
        ]);
    }
    table
}

pub fn pharmacies_page(page: &Page<Pharmacy>) -> String {
    let mut table = Table::new(["ID", "NCPDP", "Name", "Chain", "Address", "In Network"]);
    for pharmacy in &page.items {
        table.row([
            pharmacy.id.to_string(),
            pharmacy.ncpdp_id.clone(),
            pharmacy.name.clone(),
            or_dash(pharmacy.chain_name.as_deref()),
            or_dash(Some(pharmacy.address.one_line().as_str())),
            yes_no(pharmacy.in_network).to_string(),
        ]);
    }
    with_footer(table, page)
}

fn with_footer<T>(table: Table, page: &Page<T>) -> String {
    let mut out = if table.is_empty() {
        "No results.\n".to_string()
    } else {
        table.render()
    };
    out.push_str(&page_footer(page));
    out.push('\n');
    out
}

pub fn claim_detail(claim: &Claim) -> String {
    let mut table = Table::new(["Field", "Value"]);
    table
        .row(["Claim #", claim.claim_number.as_str()])
        .row(["Rx #", or_dash(claim.rx_number.as_deref()).as_str()])
        .row(["Status", claim.status.as_str()])
        .row(["Member", claim.member_name.clone().unwrap_or_else(|| claim.member_id.to_string()).as_str()])
        .row(["Drug", claim.drug_name.clone().unwrap_or_else(|| claim.drug_id.to_string()).as_str()])
        .row(["Pharmacy", claim.pharmacy_id.to_string().as_str()])
        .row(["Prescriber", or_dash(claim.prescriber.name.as_deref()).as_str()])
        .row(["Total cost", format_currency(claim.total_cost()).as_str()])
        .row([
            "Plan paid",
            claim.pricing.plan_paid_amount.map(format_currency).unwrap_or_else(|| "-".into()).as_str(),
        ])
        .row([
            "Copay",
            claim.pricing.member_copay.map(format_currency).unwrap_or_else(|| "-".into()).as_str(),
        ]);
    if let Some((code, reason)) = claim.rejection() {
        table.row(["Rejection", format!("{code} {reason}").trim()]);
    }
    table.render()
}

pub fn member_detail(member: &Member) -> String {
    let mut table = Table::new(["Field", "Value"]);
    table
        .row(["Member ID", member.member_id.as_str()])
        .row(["Name", member.full_name().as_str()])
        .row([
            "Date of birth",
            member.date_of_birth.map(|d| d.to_string()).unwrap_or_else(|| "-".into()).as_str(),
        ])
        .row(["Email", or_dash(member.email.as_deref()).as_str()])
        .row(["Phone", or_dash(member.phone.as_deref()).as_str()])
        .row(["Address", or_dash(Some(member.address.one_line().as_str())).as_str()])
        .row(["Plan", or_dash(member.plan_type.as_deref()).as_str()])
        .row(["Group", or_dash(member.group_id.as_deref()).as_str()])
        .row(["Active", yes_no(member.is_active)]);
    table.render()
}

pub fn drug_detail(drug: &Drug) -> String {
    let mut table = Table::new(["Field", "Value"]);
    table
        .row(["NDC", drug.ndc.as_str()])
        .row(["Name", drug.name.as_str()])
        .row(["Generic name", or_dash(drug.generic_name.as_deref()).as_str()])
        .row(["Brand name", or_dash(drug.brand_name.as_deref()).as_str()])
        .row(["Strength", or_dash(drug.strength.as_deref()).as_str()])
        .row(["Dosage form", or_dash(drug.dosage_form.as_deref()).as_str()])
        .row(["Therapeutic class", or_dash(drug.therapeutic_class.as_deref()).as_str()])
        .row(["Manufacturer", or_dash(drug.manufacturer.as_deref()).as_str()])
        .row(["Generic", yes_no(drug.is_generic)])
        .row(["AWP", drug.awp.map(format_currency).unwrap_or_else(|| "-".into()).as_str()]);
    table.render()
}

pub fn pharmacy_detail(pharmacy: &Pharmacy) -> String {
    let mut table = Table::new(["Field", "Value"]);
    table
        .row(["NCPDP", pharmacy.ncpdp_id.as_str()])
        .row(["NPI", or_dash(pharmacy.npi.as_deref()).as_str()])
        .row(["Name", pharmacy.name.as_str()])
        .row(["Chain", or_dash(pharmacy.chain_name.as_deref()).as_str()])
        .row(["Address", or_dash(Some(pharmacy.address.one_line().as_str())).as_str()])
        .row(["Type", or_dash(pharmacy.pharmacy_type.as_deref()).as_str()])
        .row(["In network", yes_no(pharmacy.in_network)])
        .row(["Tier", or_dash(pharmacy.network_tier.as_deref()).as_str()]);
    table.render()
}
