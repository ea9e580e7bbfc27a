//! Help drawer content: what a metric or chart shows, why it matters, how to read it

use crate::MetricKey;
use serde::{Deserialize, Serialize};

/// Text shown in the help drawer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HelpContent {
    pub title: &'static str,
    pub what: &'static str,
    pub why: &'static str,
    pub how: &'static str,
}

impl HelpContent {
    const fn new(title: &'static str, what: &'static str, why: &'static str, how: &'static str) -> Self {
        Self { title, what, why, how }
    }
}

/// Section-level help topics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HelpTopic {
    ImpactBySector,
    ImpactByRegion,
    SdgContribution,
    CatalyticLeverage,
    IntraAfricanTradeShare,
    GovernmentRevenueMultiplier,
    SmeParticipationFunnel,
    InclusiveJobs,
    LocalContent,
    IntraInvestmentFlows,
}

impl HelpTopic {
    pub fn all() -> &'static [Self] {
        &[
            Self::ImpactBySector,
            Self::ImpactByRegion,
            Self::SdgContribution,
            Self::CatalyticLeverage,
            Self::IntraAfricanTradeShare,
            Self::GovernmentRevenueMultiplier,
            Self::SmeParticipationFunnel,
            Self::InclusiveJobs,
            Self::LocalContent,
            Self::IntraInvestmentFlows,
        ]
    }

    pub fn content(&self) -> HelpContent {
        match self {
            Self::ImpactBySector => HelpContent::new(
                "Impact by Sector",
                "Sectors compared on total disbursement (US$M), number of projects and jobs per US$1M.",
                "Shows where capital goes, how many initiatives it reaches and how labour-intensive the outcomes are.",
                "Bars share one scale across sectors. Each small square is about one project, capped for display. Jobs per US$1M is a quick efficiency ratio.",
            ),
            Self::ImpactByRegion => HelpContent::new(
                "Impact by Region",
                "Footprint across sub-regions: disbursement, intra-African trade, manufactured exports and SMEs supported, plus projects and jobs.",
                "Highlights geographic balance against the trade and manufacturing mandates.",
                "Each metric uses one scale for every region. Trade and exports share a scale so they can be compared directly.",
            ),
            Self::SdgContribution => HelpContent::new(
                "SDG Contribution",
                "Percentage of projects tagged to each Sustainable Development Goal.",
                "Connects portfolio activity to development priorities.",
                "Each grid is 10×10, one square per percent. Sums can exceed 100% because a project may serve several goals.",
            ),
            Self::CatalyticLeverage => HelpContent::new(
                "Catalytic Leverage (other / bank)",
                "Co-financing crowded in per US$1 of bank money (other ÷ bank).",
                "Measures how bank participation mobilises other investors.",
                "The outer ring fills to the leverage ratio and takes the colour of its band. The inner ring shows the share of the total from other sources.",
            ),
            Self::IntraAfricanTradeShare => HelpContent::new(
                "Intra-African Trade Share",
                "Share of supported trade flows that stay within Africa (intra ÷ total).",
                "Core indicator for regional integration.",
                "100% stacked bar: the filled segment is intra-African, the pale segment the rest. The badge shows the exact percent.",
            ),
            Self::GovernmentRevenueMultiplier => HelpContent::new(
                "Government-Revenue Multiplier",
                "Government revenue generated per US$1 of bank financing (gov revenue ÷ bank).",
                "Shows the fiscal contribution of supported activity through taxes, duties and fees.",
                "Each thermometer fills to its multiplier. Red is below the minimum, gold acceptable, green strong. Open the breakdown for the tax mix.",
            ),
            Self::SmeParticipationFunnel => HelpContent::new(
                "SME Participation Funnel",
                "How SMEs progress from Eligible to Approved, Disbursed and Active.",
                "Shows pipeline quality and where drop-offs happen. Overlay strips show women- and youth-led SMEs.",
                "Bar width is the SME count at that stage. Hover a stage to see conversion from the previous one. SMEs per $1M divides the selected stage by total investment.",
            ),
            Self::InclusiveJobs => HelpContent::new(
                "Inclusive Employment (Women, Men, Youth 18–35)",
                "Share of jobs held by women and men, with a band for the share held by youth.",
                "Gender and youth inclusion are headline development indicators.",
                "Women on the left, men on the right. The centred band is the youth share of all jobs and spans both sides. Percent labels are rounded.",
            ),
            Self::LocalContent => HelpContent::new(
                "Domestic Value Chain Contribution (Local content)",
                "Split between domestically sourced and imported inputs over time.",
                "Local sourcing keeps more value in-country and builds supply chains.",
                "The teal band is domestic, the gold band imported. On narrow screens the ribbon becomes 100% stacked bars. Hover to see the split for one period.",
            ),
            Self::IntraInvestmentFlows => HelpContent::new(
                "Intra-African Investment Flows",
                "Directed investment flows between sub-regions in the period.",
                "Reveals corridors and gaps between regions.",
                "Each curve runs from origin to destination and its thickness shows the amount. Use the slider to hide small flows. Hover or focus a region (arrow keys and Enter) to highlight its flows.",
            ),
        }
    }
}

impl MetricKey {
    pub fn help(&self) -> HelpContent {
        match self {
            Self::TotalAmountDisbursed => HelpContent::new(
                "Total Amount Disbursed (US$)",
                "Funds disbursed across all active facilities in the period.",
                "Shows the scale of capital deployed.",
                "Left dot is the previous period, right dot the current one. Labels show exact amounts.",
            ),
            Self::InvestmentAttracted => HelpContent::new(
                "Investment attracted (US$)",
                "Third-party capital mobilised alongside bank financing.",
                "Measures the catalytic effect of bank funding.",
                "A bigger rise means stronger crowd-in. Pair with Catalytic Leverage.",
            ),
            Self::ProjectsFundedTotal => HelpContent::new(
                "Total number of Projects Funded",
                "Unique projects that received disbursement in the period.",
                "Shows reach beyond dollar amounts.",
                "Compare with disbursement to see intensity per project.",
            ),
            Self::ProjectsFundedNew => HelpContent::new(
                "New Projects Funded",
                "Projects receiving their first disbursement in the period.",
                "Signals pipeline growth.",
                "Read together with existing projects.",
            ),
            Self::ProjectsFundedExisting => HelpContent::new(
                "Existing Projects Funded",
                "Projects receiving further disbursement on existing facilities.",
                "Shows execution on multi-tranche programmes.",
                "If this rises while total projects is flat, average ticket size is growing.",
            ),
            Self::IntraAfricanTradeFacilitated => HelpContent::new(
                "Intra-African Trade Facilitated (US$)",
                "Value of supported trade within Africa.",
                "Tracks progress on the intra-African mandate.",
                "See the region view for where it occurs.",
            ),
            Self::ManufacturedExportsFacilitated => HelpContent::new(
                "Manufactured Exports Facilitated (US$)",
                "Manufactured exports supported by financed projects.",
                "Indicates export diversification.",
                "Interpret alongside the intra-African share.",
            ),
            Self::PaymentServicesAccessingEntities => HelpContent::new(
                "Entities Accessing Payment Services",
                "Unique entities that used the payment services.",
                "Reflects digital reach.",
                "Pair with banks onboarded for network effects.",
            ),
            Self::SmesConnectedToMarkets => HelpContent::new(
                "SMEs Connected to Markets",
                "SMEs receiving market linkage or export readiness support.",
                "Speaks to inclusion and last-mile impact.",
                "Track SMEs per $1M in the funnel view.",
            ),
            Self::BanksOnboarded => HelpContent::new(
                "Banks Onboarded",
                "Banks onboarded to platforms or programmes.",
                "Expands distribution capacity.",
                "Consider together with payment services.",
            ),
            Self::JobsCreatedSustained => HelpContent::new(
                "Jobs Created/Sustained",
                "Direct and indirect jobs created or sustained.",
                "Core development outcome.",
                "Use jobs per US$1M in the sector view for intensity.",
            ),
            Self::PeopleBenefited => HelpContent::new(
                "People Benefited",
                "People gaining access to services such as power, transport or finance.",
                "Captures reach beyond formal jobs.",
                "Combine with sector composition.",
            ),
            Self::SubLoansToSmes => HelpContent::new(
                "Sub Loans to SMEs",
                "SME sub-loans disbursed through intermediaries.",
                "Shows penetration from wholesale lines to retail outcomes.",
                "Compare with SMEs supported.",
            ),
            Self::LocalContent => HelpTopic::LocalContent.content(),
        }
    }
}

/// Anything the help drawer can open
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HelpKey {
    Metric(MetricKey),
    Topic(HelpTopic),
}

impl HelpKey {
    pub fn content(&self) -> HelpContent {
        match self {
            Self::Metric(k) => k.help(),
            Self::Topic(t) => t.content(),
        }
    }
}

impl From<HelpTopic> for HelpKey {
    fn from(t: HelpTopic) -> Self {
        Self::Topic(t)
    }
}

impl From<MetricKey> for HelpKey {
    fn from(k: MetricKey) -> Self {
        Self::Metric(k)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_topic_has_text() {
        for t in HelpTopic::all() {
            let c = t.content();
            assert!(!c.title.is_empty());
            assert!(!c.what.is_empty() && !c.why.is_empty() && !c.how.is_empty());
        }
    }

    #[test]
    fn test_help_key_dispatch() {
        let k: HelpKey = MetricKey::LocalContent.into();
        assert_eq!(k.content(), HelpTopic::LocalContent.content());
        let t: HelpKey = HelpTopic::SdgContribution.into();
        assert!(t.content().how.contains("100%"));
    }
}
