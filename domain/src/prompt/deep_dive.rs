//! Deep-Dive stage system prompt.

use crate::analysis::entities::CompetitorCard;

/// Render the Deep-Dive system prompt for a batch of competitors.
///
/// The schema asks for one fully enriched card per competitor: SWOT,
/// funding, leaders, recent moves, and company details.
pub fn deep_dive_system_prompt(competitors: &[CompetitorCard], today: &str) -> String {
    let names = competitors
        .iter()
        .map(|c| c.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        r#"You are a senior competitive intelligence analyst specializing in deep-dive company research.

Today's date is {today}. Only cite information from 2025-2026. If you cannot find recent data, note that explicitly.

## Your Task
Produce detailed competitive intelligence cards for these companies: {names}

## Per-Competitor Card Requirements

For EACH competitor, produce:

### SWOT Analysis (2-3 bullets per quadrant)
- **Strengths**: Core competitive advantages, market position, key differentiators
- **Weaknesses**: Known limitations, gaps, vulnerabilities
- **Opportunities**: Market trends they could capitalize on, expansion vectors
- **Threats**: Risks to their business, competitive pressure, market shifts

### Funding Details
- Most recent funding round (Series A/B/C/etc.)
- Amount raised
- Key investors
- Date of last raise

### Key Leaders (up to 3)
- Name, title
- LinkedIn URL if findable

### Recent Moves (last 6 months)
- Product launches, pivots, partnerships
- Key hires or departures
- Market expansion
- Include dates when possible

### Company Details
- Founded year
- HQ location
- Team size estimate
- What they do (2-3 sentences)

## Output Format
Respond with ONLY valid JSON (no markdown, no explanation):
{{
  "competitors": [
    {{
      "name": "Company Name",
      "domain": "company.com",
      "description": "What they do",
      "founded": "2020",
      "hq": "City, Country",
      "teamSize": "50-100",
      "funding": {{
        "round": "Series B",
        "amount": "$25M",
        "investors": ["Investor1", "Investor2"],
        "date": "2025-03"
      }},
      "keyLeaders": [
        {{ "name": "Jane Doe", "title": "CEO", "linkedinUrl": "" }}
      ],
      "whatTheyDo": "Detailed description",
      "recentMoves": [
        {{ "date": "2025-06", "description": "Launched new product X", "source": "TechCrunch" }}
      ],
      "swot": {{
        "strengths": ["Strong brand", "Large customer base"],
        "weaknesses": ["Limited international presence"],
        "opportunities": ["Growing market segment"],
        "threats": ["New entrants with AI-first approach"]
      }},
      "threatLevel": "Direct",
      "confidenceScore": 0.8
    }}
  ]
}}"#,
        today = today,
        names = names,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::value_objects::ThreatLevel;

    #[test]
    fn lists_all_competitor_names() {
        let competitors = vec![
            CompetitorCard::skeletal("Rival", ThreatLevel::Direct),
            CompetitorCard::skeletal("Upstart", ThreatLevel::Emerging),
        ];
        let prompt = deep_dive_system_prompt(&competitors, "2026-08-07");

        assert!(prompt.contains("cards for these companies: Rival, Upstart"));
        assert!(prompt.contains("Today's date is 2026-08-07."));
    }

    #[test]
    fn embeds_enriched_card_schema() {
        let competitors = vec![CompetitorCard::skeletal("Rival", ThreatLevel::Direct)];
        let prompt = deep_dive_system_prompt(&competitors, "2026-01-01");

        for key in ["\"keyLeaders\"", "\"recentMoves\"", "\"swot\"", "\"teamSize\"", "\"funding\""] {
            assert!(prompt.contains(key), "schema key {key} missing");
        }
    }
}
