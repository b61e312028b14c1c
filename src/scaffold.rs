//! Interactive scaffolding for new modules.
//!
//! Runs a guided question sequence over plain line-oriented stdin, builds a
//! [`ModuleDescriptor`], and materializes a starter project directory.

use crate::descriptor::{Author, ModuleDescriptor};
use crate::fs::FileSystem;
use crate::migrate::{API_FUNCTIONS, SCRIPT_EXT};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScaffoldError {
    #[error("Directory already exists: {}", .0.display())]
    DestinationExists(PathBuf),
    #[error("Input closed before the scaffold was complete")]
    InputClosed,
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("Failed to serialize descriptor: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Line-oriented prompt session over arbitrary input/output streams, so the
/// whole question flow is testable with in-memory buffers.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn ask(&mut self, message: &str) -> Result<String, ScaffoldError> {
        write!(self.output, "{message}: ")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(ScaffoldError::InputClosed);
        }
        Ok(line.trim().to_string())
    }

    fn ask_required(&mut self, message: &str) -> Result<String, ScaffoldError> {
        loop {
            let value = self.ask(message)?;
            if !value.is_empty() {
                return Ok(value);
            }
            writeln!(self.output, "  {message} is required")?;
        }
    }

    fn ask_optional(&mut self, message: &str) -> Result<Option<String>, ScaffoldError> {
        let value = self.ask(&format!("{message} (optional)"))?;
        Ok(if value.is_empty() { None } else { Some(value) })
    }

    fn ask_validated(
        &mut self,
        message: &str,
        complaint: &str,
        valid: impl Fn(&str) -> bool,
    ) -> Result<String, ScaffoldError> {
        loop {
            let value = self.ask(message)?;
            if valid(&value) {
                return Ok(value);
            }
            writeln!(self.output, "  {complaint}")?;
        }
    }

    /// Numbered single choice; returns the chosen value.
    fn ask_select(
        &mut self,
        message: &str,
        choices: &[(&str, &str)],
    ) -> Result<String, ScaffoldError> {
        loop {
            writeln!(self.output, "{message}:")?;
            for (i, (title, _)) in choices.iter().enumerate() {
                writeln!(self.output, "  {}) {title}", i + 1)?;
            }
            let value = self.ask("Choice")?;
            if let Ok(n) = value.parse::<usize>()
                && (1..=choices.len()).contains(&n)
            {
                return Ok(choices[n - 1].1.to_string());
            }
            writeln!(self.output, "  Enter a number between 1 and {}", choices.len())?;
        }
    }

    /// Numbered multi-choice (comma-separated); at least one is required.
    fn ask_multi(
        &mut self,
        message: &str,
        choices: &[(&str, &str)],
    ) -> Result<Vec<String>, ScaffoldError> {
        loop {
            writeln!(self.output, "{message} (comma-separated):")?;
            for (i, (title, _)) in choices.iter().enumerate() {
                writeln!(self.output, "  {}) {title}", i + 1)?;
            }
            let value = self.ask("Choice")?;
            let mut picked = Vec::new();
            let mut ok = !value.is_empty();
            for part in value.split(',') {
                match part.trim().parse::<usize>() {
                    Ok(n) if (1..=choices.len()).contains(&n) => {
                        let v = choices[n - 1].1.to_string();
                        if !picked.contains(&v) {
                            picked.push(v);
                        }
                    }
                    _ => {
                        ok = false;
                        break;
                    }
                }
            }
            if ok && !picked.is_empty() {
                return Ok(picked);
            }
            writeln!(self.output, "  Enter numbers between 1 and {}", choices.len())?;
        }
    }

    fn ask_confirm(&mut self, message: &str, default: bool) -> Result<bool, ScaffoldError> {
        let suffix = if default { "[Y/n]" } else { "[y/N]" };
        loop {
            let value = self.ask(&format!("{message} {suffix}"))?.to_lowercase();
            match value.as_str() {
                "" => return Ok(default),
                "y" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                _ => writeln!(self.output, "  Answer y or n")?,
            }
        }
    }
}

fn is_valid_project_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-')
}

/// Run the full question sequence and resolve the answers into a project
/// name plus descriptor. Invalid answers are re-asked, not fatal.
pub fn collect<R: BufRead, W: Write>(
    p: &mut Prompter<R, W>,
) -> Result<(String, ModuleDescriptor), ScaffoldError> {
    let project_name = p.ask_validated(
        "Project name",
        "Only lowercase letters, numbers, _ or - allowed",
        is_valid_project_name,
    )?;
    let source_name = p.ask_required("Source name")?;
    let description = p.ask_optional("Description")?;
    let icon_url = p.ask_required("Module icon URL")?;
    let author_name = p.ask_required("Author name")?;
    let author_icon = p.ask_required("Author icon URL")?;
    let author_url = p.ask_optional("Author profile URL")?;

    let group = p.ask_select(
        "Content category",
        &[
            ("Video (Anime / Movies / Shows)", "video"),
            ("Reading (Manga / Novels)", "reading"),
        ],
    )?;
    let is_video = group == "video";

    let types = if is_video {
        p.ask_multi(
            "Select video types",
            &[("Anime", "anime"), ("Movies", "movies"), ("Shows", "shows")],
        )?
    } else {
        p.ask_multi(
            "Select reading types",
            &[("Manga", "manga"), ("Novels", "novels")],
        )?
    };

    let (stream_type, quality) = if is_video {
        (
            Some(p.ask_select("Stream type", &[("HLS", "HLS"), ("MP4", "MP4")])?),
            Some(p.ask_select(
                "Default quality",
                &[
                    ("360p", "360p"),
                    ("720p", "720p"),
                    ("1080p", "1080p"),
                    ("2K (1440p)", "1440p"),
                    ("4K (2160p)", "4k"),
                ],
            )?),
        )
    } else {
        (None, None)
    };

    let base_url = p.ask_required("Base URL")?;
    let search_base_url = p.ask_validated(
        "Search URL (must include %s)",
        "Search URL must include %s",
        |v| v.contains("%s"),
    )?;
    let script_url = p.ask_required("Script URL")?;
    let download_support = p.ask_confirm("Download support?", false)?;
    let async_js = p.ask_confirm("Load script asynchronously?", true)?;
    let (stream_async_js, softsub) = if is_video {
        (
            Some(p.ask_confirm("Stream async only?", false)?),
            Some(p.ask_confirm("Soft subtitles?", true)?),
        )
    } else {
        (None, None)
    };
    let combo = p.ask_confirm("Multiple sources in one module?", false)?;

    let descriptor = ModuleDescriptor {
        source_name,
        description,
        icon_url,
        author: Author {
            name: author_name,
            icon: author_icon,
            url: author_url,
        },
        version: 1,
        language: "English".to_string(),
        base_url,
        search_base_url,
        script_url,
        stream_type,
        quality,
        content_types: types.join("/"),
        download_support,
        async_js,
        stream_async_js,
        softsub,
        combo,
    };

    Ok((project_name, descriptor))
}

/// Starter script placed at `src/index.js` in a new module: one stub per
/// API function relevant to the chosen content category.
pub fn starter_script(descriptor: &ModuleDescriptor) -> String {
    let hooks: &[&str] = if descriptor.is_video() {
        &["searchResults", "extractDetails", "extractEpisodes", "extractStreamUrl"]
    } else {
        &["searchResults", "extractDetails", "extractChapters", "extractImages"]
    };

    let mut out = String::new();
    for hook in hooks {
        debug_assert!(API_FUNCTIONS.contains(hook));
        out.push_str(&format!(
            "export async function {hook}(input) {{\n    throw new Error(\"{hook} is not implemented\");\n}}\n\n"
        ));
    }
    out.truncate(out.trim_end().len());
    out.push('\n');
    out
}

/// Materialize the scaffolded module at `dest`: a starter `src/` tree plus
/// the descriptor JSON named after the project. Refuses to overwrite.
pub fn write_project(
    fs: &dyn FileSystem,
    dest: &Path,
    name: &str,
    descriptor: &ModuleDescriptor,
) -> Result<(), ScaffoldError> {
    if fs.exists(dest) {
        return Err(ScaffoldError::DestinationExists(dest.to_path_buf()));
    }

    let src = dest.join("src");
    fs.create_dir_all(&src)?;
    fs.write(
        &src.join(format!("index.{SCRIPT_EXT}")),
        &starter_script(descriptor),
    )?;
    fs.write(
        &dest.join(format!("{name}.json")),
        &descriptor.to_pretty_json()?,
    )?;
    Ok(())
}
