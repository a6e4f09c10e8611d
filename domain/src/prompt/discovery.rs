//! Discovery stage system prompt.

use crate::analysis::entities::AnalysisInput;

/// Render the Discovery system prompt.
///
/// The output schema at the bottom is what the Discovery parser expects:
/// a `profile` object plus skeletal `competitors` entries.
pub fn discovery_system_prompt(input: &AnalysisInput, today: &str) -> String {
    let geography = match &input.target_geography {
        Some(geos) if !geos.is_empty() => geos.join(", "),
        _ => "Global".to_string(),
    };

    let mut context = format!(
        "- Domain: {domain}\n- GICS Sector: {industry}\n- GICS Sub-Industry: {sub}\n",
        domain = input.domain,
        industry = input.industry,
        sub = input.sub_industry,
    );
    if let Some(hq) = &input.hq {
        context.push_str(&format!("- Headquarters: {hq}\n"));
    }
    context.push_str(&format!("- Target Geography: {geography}\n"));
    if let Some(known) = &input.known_competitors {
        context.push_str(&format!(
            "- Known competitors (use as starting points): {known}\n"
        ));
    }

    format!(
        r#"You are an elite competitive intelligence analyst using Crayon/Klue/Kompyte methodology.

Today's date is {today}. Only cite information from 2025-2026. If you cannot find recent data, note that explicitly.

## Your Task
Profile the target company at domain "{domain}" and identify their top competitors.

## Target Context
{context}
## 5-Phase Process

### Phase 1: Profile Target
Identify the company behind the domain. Determine: legal name, what they sell, primary market, ICP, estimated size, and positioning.

### Phase 2: Identify Competitors
Using the GICS sub-industry "{sub}" as primary lens:
- Search for direct competitors in the same sub-industry
- Search for adjacent competitors from related sub-industries
- Search for emerging/disruptive competitors

### Phase 3: Classify
Categorize each competitor as:
- **Direct**: Same sub-industry, same ICP, head-to-head
- **Adjacent**: Related market, partial overlap, could expand into target's space
- **Emerging**: New entrant, different approach, potential disruptor

### Phase 4: Validate
For each competitor, verify they are a real company with an active website/product.

### Phase 5: Prioritize
Rank by threat level and relevance. Return maximum 5 competitors.

## Output Format
Respond with ONLY valid JSON (no markdown, no explanation):
{{
  "profile": {{
    "name": "Company Name",
    "domain": "{domain}",
    "industry": "{industry}",
    "subIndustry": "{sub}",
    "hq": "City, Country",
    "description": "One paragraph description"
  }},
  "competitors": [
    {{
      "name": "Competitor Name",
      "domain": "competitor.com",
      "description": "What they do in 1-2 sentences",
      "threatLevel": "Direct|Adjacent|Emerging",
      "confidenceScore": 0.85
    }}
  ]
}}

Include a confidenceScore (0-1) reflecting how confident you are in the classification. Cross-reference across multiple sources when possible."#,
        today = today,
        domain = input.domain,
        industry = input.industry,
        sub = input.sub_industry,
        context = context,
    )
}
