//! Markdown templates for each bundle topic

use crate::intelligence::{
    ChangelogFile, ColorsFile, CompetitiveFile, CompetitorProfile, ComponentsFile, CopySection,
    FlowGuide, Index, PatternsFile, TypographyFile,
};
use crate::skill::SkillMetadata;
use anyhow::Result;
use screenvault_patterns::classify;
use screenvault_types::{slugify, Classification};
use std::path::PathBuf;

/// A markdown file ready to be written, path relative to the bundle root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFile {
    pub path: PathBuf,
    pub content: String,
}

impl RenderedFile {
    fn new(path: impl Into<PathBuf>, content: String) -> Self {
        Self {
            path: path.into(),
            content,
        }
    }

    pub fn line_count(&self) -> usize {
        self.content.lines().count()
    }
}

/// Small markdown writer; blocks are separated by one blank line
#[derive(Default)]
struct Markdown {
    out: String,
}

impl Markdown {
    fn block(&mut self, text: &str) -> &mut Self {
        if !self.out.is_empty() {
            self.out.push('\n');
        }
        self.out.push_str(text);
        self.out.push('\n');
        self
    }

    fn heading(&mut self, level: usize, text: &str) -> &mut Self {
        self.block(&format!("{} {}", "#".repeat(level), text))
    }

    fn paragraph(&mut self, text: &str) -> &mut Self {
        self.block(text.trim())
    }

    fn bullets<I, S>(&mut self, items: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let list: Vec<String> = items
            .into_iter()
            .map(|item| format!("- {}", item.as_ref()))
            .collect();
        if list.is_empty() {
            return self;
        }
        self.block(&list.join("\n"))
    }

    fn table(&mut self, headers: &[&str], rows: Vec<Vec<String>>) -> &mut Self {
        if rows.is_empty() {
            return self;
        }
        let mut table = format!("| {} |\n", headers.join(" | "));
        table.push_str(&format!(
            "|{}\n",
            headers.iter().map(|_| "---|").collect::<String>()
        ));
        for row in rows {
            let cells: Vec<String> = row.iter().map(|c| escape_cell(c)).collect();
            table.push_str(&format!("| {} |\n", cells.join(" | ")));
        }
        self.block(table.trim_end())
    }

    fn finish(self) -> String {
        self.out
    }
}

fn escape_cell(cell: &str) -> String {
    cell.replace('|', "\\|").replace('\n', " ")
}

fn percent(rate: f64) -> String {
    format!("{:.0}%", rate * 100.0)
}

fn or_dash(value: Option<&str>) -> String {
    value.unwrap_or("-").to_string()
}

/// File stem for a named entry; names with no usable characters fall back to `{kind}-{position}`
pub(crate) fn file_slug(name: &str, kind: &str, position: usize) -> String {
    let slug = slugify(name);
    if slug.is_empty() {
        format!("{kind}-{position}")
    } else {
        slug
    }
}

/// Topic listed in the SKILL.md file table
pub(crate) fn topic_of(path: &str) -> &'static str {
    match path {
        "design/patterns.md" => "UX pattern adoption",
        "design/colors.md" => "Color palettes",
        "design/typography.md" => "Typography",
        "design/components.md" => "UI components",
        "changelog.md" => "Changelog",
        "competitive/overview.md" => "Competitive landscape",
        p if p.starts_with("flows/") => "User flow",
        p if p.starts_with("copy/") => "UX copy",
        p if p.starts_with("competitive/") => "App teardown",
        _ => "Reference",
    }
}

/// `SKILL.md`, listing every other generated file
pub fn skill(index: &Index, files: &[RenderedFile]) -> Result<RenderedFile> {
    let metadata = SkillMetadata {
        name: slugify(&index.name),
        description: index.description.split_whitespace().collect::<Vec<_>>().join(" "),
    };
    let frontmatter = serde_yaml::to_string(&metadata)?;

    let mut md = Markdown::default();
    md.heading(1, index.title.as_deref().unwrap_or(&index.name))
        .paragraph(&index.description);

    let mut meta = Vec::new();
    if let Some(version) = &index.version {
        meta.push(format!("Version {version}"));
    }
    if let Some(generated_at) = &index.generated_at {
        meta.push(format!("generated {generated_at}"));
    }
    if !meta.is_empty() {
        md.paragraph(&format!("_{}_", meta.join(", ")));
    }

    md.heading(2, "Coverage").bullets([
        format!("Apps analyzed: {}", index.app_count),
        format!("Screens analyzed: {}", index.screen_count),
    ]);

    if !index.highlights.is_empty() {
        md.heading(2, "Highlights").bullets(&index.highlights);
    }

    if !files.is_empty() {
        let rows = files
            .iter()
            .map(|f| {
                let path = f.path.to_string_lossy().replace('\\', "/");
                vec![format!("[{path}]({path})"), topic_of(&path).to_string()]
            })
            .collect();
        md.heading(2, "Files").table(&["File", "Topic"], rows);
    }

    let content = format!("---\n{}\n---\n\n{}", frontmatter.trim_end(), md.finish());
    Ok(RenderedFile::new("SKILL.md", content))
}

/// `design/patterns.md`, grouped by classification
pub fn patterns(file: &PatternsFile) -> RenderedFile {
    let mut md = Markdown::default();
    md.heading(1, "UX Pattern Adoption").paragraph(
        "Dominant patterns appear in at least 70% of analyzed apps, common ones in 30-70%.",
    );

    let classified: Vec<(Classification, &_)> = file
        .patterns
        .iter()
        .map(|p| (classify(p.adoption_rate, p.classification), p))
        .collect();

    for (bucket, title) in [
        (Classification::Dominant, "Dominant"),
        (Classification::Common, "Common"),
        (Classification::Emerging, "Emerging"),
        (Classification::Outlier, "Outliers"),
    ] {
        let mut in_bucket: Vec<_> = classified
            .iter()
            .filter(|(c, _)| *c == bucket)
            .map(|(_, p)| *p)
            .collect();
        if in_bucket.is_empty() {
            continue;
        }
        in_bucket.sort_by(|a, b| {
            b.adoption_rate
                .total_cmp(&a.adoption_rate)
                .then_with(|| a.name.cmp(&b.name))
        });

        let rows = in_bucket
            .iter()
            .map(|p| {
                vec![
                    p.name.clone(),
                    percent(p.adoption_rate),
                    or_dash(p.description.as_deref()),
                    if p.apps.is_empty() {
                        "-".to_string()
                    } else {
                        p.apps.join(", ")
                    },
                ]
            })
            .collect();
        md.heading(2, title)
            .table(&["Pattern", "Adoption", "Notes", "Apps"], rows);
    }

    RenderedFile::new("design/patterns.md", md.finish())
}

/// `design/colors.md`
pub fn colors(file: &ColorsFile) -> RenderedFile {
    let mut md = Markdown::default();
    md.heading(1, "Color Palettes");

    let mut palettes: Vec<_> = file.palettes.iter().collect();
    palettes.sort_by(|a, b| a.app.cmp(&b.app));
    let rows = palettes
        .iter()
        .map(|p| {
            vec![
                p.app.clone(),
                format!("`{}`", p.accent),
                or_dash(p.background.as_deref()),
                or_dash(p.text.as_deref()),
            ]
        })
        .collect();
    md.table(&["App", "Accent", "Background", "Text"], rows);

    if !file.insights.is_empty() {
        md.heading(2, "Insights").bullets(&file.insights);
    }
    RenderedFile::new("design/colors.md", md.finish())
}

/// `design/typography.md`
pub fn typography(file: &TypographyFile) -> RenderedFile {
    let mut md = Markdown::default();
    md.heading(1, "Typography");

    let mut fonts: Vec<_> = file.fonts.iter().collect();
    fonts.sort_by(|a, b| b.usage.total_cmp(&a.usage).then_with(|| a.family.cmp(&b.family)));
    let rows = fonts
        .iter()
        .map(|f| vec![f.family.clone(), percent(f.usage), f.apps.join(", ")])
        .collect();
    md.table(&["Family", "Usage", "Apps"], rows);

    if !file.insights.is_empty() {
        md.heading(2, "Insights").bullets(&file.insights);
    }
    RenderedFile::new("design/typography.md", md.finish())
}

/// `design/components.md`
pub fn components(file: &ComponentsFile) -> RenderedFile {
    let mut md = Markdown::default();
    md.heading(1, "UI Components");

    for component in &file.components {
        md.heading(2, &component.name);
        if let Some(description) = &component.description {
            md.paragraph(description);
        }
        md.paragraph(&format!("Used by {} of analyzed apps.", percent(component.usage)));
        if !component.best_practices.is_empty() {
            md.heading(3, "Best practices")
                .bullets(&component.best_practices);
        }
    }
    RenderedFile::new("design/components.md", md.finish())
}

/// `flows/{flow}.md`, `position` is the 1-based entry number in flows.json
pub fn flow(guide: &FlowGuide, position: usize) -> RenderedFile {
    let mut md = Markdown::default();
    md.heading(1, &format!("{} Flow", guide.name));
    if let Some(summary) = &guide.summary {
        md.paragraph(summary);
    }
    if let Some(avg) = guide.average_steps {
        md.paragraph(&format!("Average length: {avg:.1} screens."));
    }

    if !guide.steps.is_empty() {
        let steps: Vec<String> = guide
            .steps
            .iter()
            .enumerate()
            .map(|(i, step)| match &step.description {
                Some(description) => format!("{}. **{}**: {}", i + 1, step.label, description),
                None => format!("{}. **{}**", i + 1, step.label),
            })
            .collect();
        md.heading(2, "Typical steps").block(&steps.join("\n"));
    }

    if !guide.best_practices.is_empty() {
        md.heading(2, "Best practices").bullets(&guide.best_practices);
    }

    if !guide.examples.is_empty() {
        let rows = guide
            .examples
            .iter()
            .map(|e| vec![e.app.clone(), e.steps.to_string()])
            .collect();
        md.heading(2, "Examples").table(&["App", "Screens"], rows);
    }

    RenderedFile::new(
        format!("flows/{}.md", file_slug(&guide.name, "flow", position)),
        md.finish(),
    )
}

/// `copy/{section}.md`
pub fn copy_section(section: &CopySection, position: usize) -> RenderedFile {
    let mut md = Markdown::default();
    md.heading(1, &format!("UX Copy: {}", section.name));
    if let Some(guidance) = &section.guidance {
        md.paragraph(guidance);
    }

    let rows = section
        .examples
        .iter()
        .map(|e| {
            vec![
                format!("\"{}\"", e.text),
                or_dash(e.app.as_deref()),
                or_dash(e.context.as_deref()),
            ]
        })
        .collect();
    md.heading(2, "Examples").table(&["Copy", "App", "Context"], rows);

    RenderedFile::new(
        format!("copy/{}.md", file_slug(&section.name, "copy", position)),
        md.finish(),
    )
}

/// `competitive/overview.md`
pub fn competitive_overview(file: &CompetitiveFile) -> RenderedFile {
    let mut md = Markdown::default();
    md.heading(1, "Competitive Landscape");

    let mut apps: Vec<_> = file.apps.iter().zip(1..).collect();
    apps.sort_by(|(a, _), (b, _)| a.name.cmp(&b.name));
    let rows = apps
        .iter()
        .map(|(a, position)| {
            vec![
                format!("[{}]({}.md)", a.name, file_slug(&a.slug, "app", *position)),
                or_dash(a.category.as_deref()),
                or_dash(a.summary.as_deref()),
            ]
        })
        .collect();
    md.table(&["App", "Category", "Summary"], rows);

    RenderedFile::new("competitive/overview.md", md.finish())
}

/// `competitive/{app}.md`
pub fn competitor(profile: &CompetitorProfile, position: usize) -> RenderedFile {
    let mut md = Markdown::default();
    md.heading(1, &profile.name);
    if let Some(category) = &profile.category {
        md.paragraph(&format!("Category: {category}"));
    }
    if let Some(summary) = &profile.summary {
        md.paragraph(summary);
    }

    for (title, items) in [
        ("Strengths", &profile.strengths),
        ("Weaknesses", &profile.weaknesses),
        ("Notable patterns", &profile.notable_patterns),
    ] {
        if !items.is_empty() {
            md.heading(2, title).bullets(items);
        }
    }

    RenderedFile::new(
        format!(
            "competitive/{}.md",
            file_slug(&profile.slug, "app", position)
        ),
        md.finish(),
    )
}

/// `changelog.md`
pub fn changelog(file: &ChangelogFile) -> RenderedFile {
    let mut md = Markdown::default();
    md.heading(1, "Changelog");

    for entry in &file.entries {
        let title = match &entry.date {
            Some(date) => format!("{} ({})", entry.version, date),
            None => entry.version.clone(),
        };
        md.heading(2, &title).bullets(&entry.changes);
    }
    RenderedFile::new("changelog.md", md.finish())
}
