use partsong_core::validation::Rule;
use partsong_core::RuleEngine;

fn format_rule(rule: &dyn Rule) -> String {
    format!(
        "  {:<18} {:<20} chapter {:<3} priority {}",
        rule.id(),
        rule.name(),
        rule.chapter(),
        rule.priority()
    )
}

/// Print the built-in rules, optionally narrowed to those active at `chapter`.
pub fn list_rules(chapter: Option<u32>) {
    let engine = RuleEngine::with_basic_rules();

    let rules: Vec<&dyn Rule> = match chapter {
        Some(chapter) => engine.rules_for_chapter(chapter),
        None => engine.rules().collect(),
    };

    match chapter {
        Some(chapter) => println!("\nRules active at chapter {chapter}:\n"),
        None => println!("\nAll rules:\n"),
    }

    if rules.is_empty() {
        println!("  (none)");
        return;
    }

    for rule in rules {
        println!("{}", format_rule(rule));
        let description = rule.description();
        if !description.is_empty() {
            println!("      {description}");
        }
    }
}
