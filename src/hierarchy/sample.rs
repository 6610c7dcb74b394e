// The reference map: two problems facing each other across the canvas.

use crate::layout::Arc;

use super::input::{CauseInput, HierarchyInput, SubInput, TreeInput};

fn cause(label: &str, subs: &[&str]) -> CauseInput {
    CauseInput {
        label: label.to_string(),
        subs: subs.iter().map(|s| SubInput { label: s.to_string() }).collect(),
    }
}

pub fn reference_hierarchy() -> HierarchyInput {
    HierarchyInput {
        trees: vec![
            TreeInput {
                label: "Inspiration Blockage".to_string(),
                x: 580.0,
                y: 500.0,
                arc: Some(Arc::new(-160.0, 160.0)),
                causes: vec![
                    cause("Time Scarcity", &[
                        "Solo creator juggling tasks",
                        "No batching workflow",
                        "Not leveraging automation (script→video)",
                    ]),
                    cause("Analysis Paralysis", &[
                        "Too many format options",
                        "No presets / brand guardrails",
                        "Not using Smart Posting guidance",
                    ]),
                    cause("Low Trend Visibility", &[
                        "Not using community template board",
                        "No competitor/trend scan",
                        "Platform changes unnoticed",
                    ]),
                    cause("Burnout / Fear", &[
                        "Perfectionism & over-editing",
                        "On-camera anxiety",
                        "No scripts/prompts to start",
                    ]),
                    cause("Weak Feedback Loop", &[
                        "Not reviewing analytics",
                        "No A/B tests",
                        "Ignoring engagement insights",
                    ]),
                ],
            },
            TreeInput {
                label: "Low Engagement Score".to_string(),
                x: 1620.0,
                y: 500.0,
                arc: Some(Arc::new(20.0, 340.0)),
                causes: vec![
                    cause("Weak Hook (first 3s)", &[
                        "Slow opening",
                        "Unclear promise",
                        "No pattern interrupt",
                    ]),
                    cause("Poor Retention Structure", &[
                        "Not using AI clipping",
                        "Sparse B-roll / reframing",
                        "Meandering script",
                    ]),
                    cause("Visual / Readability", &[
                        "Subtitle color contrast off",
                        "Missing keyword highlighting",
                        "Character positioning clashes with overlays",
                    ]),
                    cause("Audio / Background", &[
                        "Music too loud",
                        "Mood mismatch",
                        "Low mic quality",
                    ]),
                    cause("Format / Timing Mismatch", &[
                        "Wrong aspect ratio",
                        "Length off for platform",
                        "Posting at off-peak times (not scheduled)",
                    ]),
                    cause("Ignoring Data", &[
                        "Not leveraging Smart Posting scoring",
                        "Small sample size",
                        "Not comparing like-with-like features",
                    ]),
                    cause("Asset Quality", &[
                        "Generic / repetitive background video",
                        "Low-resolution assets",
                        "No branded cover/frame",
                    ]),
                ],
            },
        ],
    }
}
