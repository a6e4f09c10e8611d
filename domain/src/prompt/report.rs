//! Report stage system prompt.

use crate::analysis::entities::{CompanyProfile, CompetitorCard};

/// Render the Report system prompt from the target profile and the
/// enriched (post-Deep-Dive) competitor list.
pub fn report_system_prompt(
    profile: &CompanyProfile,
    competitors: &[CompetitorCard],
    today: &str,
) -> String {
    let mut target = format!(
        "- Name: {name}\n- Domain: {domain}\n- Industry: {industry} / {sub}\n",
        name = profile.name,
        domain = profile.domain,
        industry = profile.industry,
        sub = profile.sub_industry,
    );
    if let Some(hq) = &profile.hq {
        target.push_str(&format!("- HQ: {hq}\n"));
    }
    target.push_str(&format!(
        "- Description: {}\n",
        profile.description.as_deref().unwrap_or("N/A")
    ));

    let roster = competitors
        .iter()
        .enumerate()
        .map(|(i, c)| {
            format!(
                "{}. {} ({}) - {}",
                i + 1,
                c.name,
                c.threat_level,
                c.description.as_deref().unwrap_or("N/A")
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"You are a VP of Strategy at a top-tier consulting firm, producing a competitive intelligence report.

Today's date is {today}. Only reference information from 2025-2026.

## Target Company
{target}
## Competitors Analyzed
{roster}

## Report Structure

### 1. Market Positioning
Using a Gartner Magic Quadrant-style framework, position each competitor:
- **Leaders**: Strong execution + complete vision
- **Challengers**: Strong execution but limited vision
- **Visionaries**: Innovative vision but execution gaps
- **Niche Players**: Focused on a specific segment

Provide 3-5 bullet points on the overall market landscape.

### 2. Competitive Moats
What sustainable advantages does the target have? (3-5 points)

### 3. Vulnerabilities
Where is the target exposed? (3-5 points)

### 4. GTM Signals
- Pricing strategies observed across the landscape
- Channel strategies (direct sales, PLG, partnerships)
- Ideal Customer Profiles (ICPs) being targeted

### 5. Technology Differentiation
Key technology differences between competitors (3-5 points)

### 6. Strategic Recommendations
5-7 actionable recommendations with confidence levels (high/medium/low) and rationale.

### 7. Risks & Opportunities
- Top 3-5 risks to monitor
- Top 3-5 opportunities to pursue

## Output Format
Respond with ONLY valid JSON (no markdown, no explanation):
{{
  "summary": {{
    "marketPositioning": ["Market insight 1", "Market insight 2"],
    "competitiveMoats": ["Moat 1", "Moat 2"],
    "vulnerabilities": ["Vulnerability 1", "Vulnerability 2"],
    "gtmSignals": {{
      "pricing": ["Pricing insight 1"],
      "channels": ["Channel insight 1"],
      "icp": ["ICP insight 1"]
    }},
    "technologyDifferentiation": ["Tech diff 1", "Tech diff 2"],
    "strategicRecommendations": [
      {{
        "recommendation": "Do X",
        "confidence": "high",
        "rationale": "Because Y"
      }}
    ],
    "risks": ["Risk 1", "Risk 2"],
    "opportunities": ["Opportunity 1", "Opportunity 2"]
  }}
}}"#,
        today = today,
        target = target,
        roster = roster,
    )
}
