use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use calico_core::error::Result;
use calico_core::{MAX_FILES, list};
use tracing::info;

use super::controller::{Controller, LIMIT_WARNING, Outcome};
use crate::config::Config;

const SHELL_HELP: &str = "\
commands:
  add <path>...      add files to the selection
  remove <n>...      remove entries by their number in `files`
  files              show the selection
  name [<name>]      show or set the output name
  create             build the archive
  clear              empty the selection
  help               this text
  quit               leave";

/// Creates the output folder if it does not exist yet.
pub fn ensure_output_dir(dir: &Path) -> Result<()> {
    if !dir.exists() {
        std::fs::create_dir_all(dir)?;
        info!(dir = %dir.display(), "created output directory");
    }
    Ok(())
}

fn controller_from(cfg: &Config) -> Result<Controller> {
    let output_dir = cfg.output_dir();
    ensure_output_dir(&output_dir)?;
    Ok(Controller::new(output_dir, cfg.name(), cfg.build_options()))
}

pub fn handle_create(cfg: Config, files: Vec<PathBuf>) -> Result<()> {
    let mut controller = controller_from(&cfg)?;
    let added = controller.add_files(files);
    if added.limit_reached {
        eprintln!("{LIMIT_WARNING}");
        std::process::exit(2);
    }
    match controller.create() {
        Outcome::Success(msg) => {
            println!("{msg}");
            Ok(())
        }
        Outcome::Error(msg) => {
            eprintln!("Error: {msg}");
            std::process::exit(1);
        }
    }
}

pub fn handle_list(archive: PathBuf) -> Result<()> {
    let rows = list(&archive)?;
    for r in &rows {
        println!(
            "{}  {} bytes  packed={}  {:?}",
            r.name, r.size, r.compressed_size, r.method
        );
    }
    eprintln!("{} entries", rows.len());
    Ok(())
}

pub fn handle_shell(cfg: Config) -> Result<()> {
    let mut controller = controller_from(&cfg)?;
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    run_shell(&mut controller, stdin.lock(), stdout.lock())
}

/// Line-oriented front end over `Controller`. Ends on `quit` or EOF.
pub fn run_shell<R: BufRead, W: Write>(
    controller: &mut Controller,
    input: R,
    mut out: W,
) -> Result<()> {
    writeln!(
        out,
        "saving to '{}' (type `help` for commands)",
        controller.output_dir().display()
    )?;
    write!(out, "> ")?;
    out.flush()?;

    for line in input.lines() {
        let line = line?;
        let mut words = line.split_whitespace();
        let Some(cmd) = words.next() else {
            write!(out, "> ")?;
            out.flush()?;
            continue;
        };
        let args: Vec<&str> = words.collect();

        match cmd {
            "add" => {
                let added = controller.add_files(args.iter().copied());
                writeln!(
                    out,
                    "added {} ({} already selected), {}/{MAX_FILES} selected",
                    added.added,
                    added.duplicates,
                    controller.selection().len()
                )?;
                if added.limit_reached {
                    writeln!(out, "warning: {LIMIT_WARNING}")?;
                } else if controller.selection().is_full() {
                    writeln!(out, "selection is full")?;
                }
            }
            "remove" => {
                // numbers as shown by `files`, starting at 1
                let parsed: std::result::Result<Vec<usize>, _> =
                    args.iter().map(|a| a.parse::<usize>()).collect();
                match parsed {
                    Ok(nums) => {
                        let idx: Vec<usize> =
                            nums.into_iter().filter_map(|n| n.checked_sub(1)).collect();
                        let removed = controller.remove(&idx);
                        writeln!(out, "removed {}", removed.len())?;
                    }
                    Err(e) => writeln!(out, "error: {e}")?,
                }
            }
            "files" => {
                for (i, p) in controller.selection().iter().enumerate() {
                    writeln!(out, "{:>3}. {}", i + 1, p.display())?;
                }
                writeln!(out, "({}/{MAX_FILES})", controller.selection().len())?;
            }
            "name" => {
                // rest of the line, so inner spacing survives
                let rest = line.trim_start()[cmd.len()..].trim();
                if !rest.is_empty() {
                    controller.set_output_name(rest);
                }
                writeln!(out, "output name: {}", controller.output_name())?;
            }
            "create" => match controller.create() {
                Outcome::Success(msg) => writeln!(out, "{msg}")?,
                Outcome::Error(msg) => writeln!(out, "error: {msg}")?,
            },
            "clear" => {
                controller.clear();
                writeln!(out, "selection cleared")?;
            }
            "help" => writeln!(out, "{SHELL_HELP}")?,
            "quit" | "exit" => return Ok(()),
            other => writeln!(out, "unknown command: {other} (try `help`)")?,
        }
        write!(out, "> ")?;
        out.flush()?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use calico_core::BuildOptions;
    use std::fs;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn run(controller: &mut Controller, script: &str) -> String {
        let mut out = Vec::new();
        run_shell(controller, Cursor::new(script.to_string()), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn shell_session_builds_archive() {
        let src = TempDir::new().unwrap();
        let out_dir = TempDir::new().unwrap();
        let a = src.path().join("a.txt");
        let b = src.path().join("b.txt");
        fs::write(&a, b"a").unwrap();
        fs::write(&b, b"b").unwrap();

        let mut c = Controller::new(
            out_dir.path().to_path_buf(),
            "my_archive.calico".into(),
            BuildOptions::default(),
        );
        let script = format!(
            "add {} {} {}\nfiles\nremove 2\nname session\ncreate\nfiles\nquit\nfiles\n",
            a.display(),
            b.display(),
            a.display()
        );
        let text = run(&mut c, &script);

        assert!(text.contains("added 2 (1 already selected), 2/20 selected"));
        assert!(text.contains("  2. "));
        assert!(text.contains("removed 1"));
        assert!(text.contains("output name: session"));
        assert!(text.contains("Successfully created session.calico containing 1 files"));
        assert!(text.contains("(0/20)"));
        assert!(c.selection().is_empty());

        let rows = list(&out_dir.path().join("session.calico")).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "a.txt");
    }

    #[test]
    fn shell_reports_errors_and_keeps_going() {
        let out_dir = TempDir::new().unwrap();
        let mut c = Controller::new(
            out_dir.path().to_path_buf(),
            "x".into(),
            BuildOptions::default(),
        );
        let text = run(&mut c, "create\nremove one\nbogus\n");
        assert!(text.contains("error: Please add at least one file."));
        assert!(text.contains("error: invalid digit"));
        assert!(text.contains("unknown command: bogus"));
    }

    #[test]
    fn shell_name_keeps_inner_spacing() {
        let out_dir = TempDir::new().unwrap();
        let mut c = Controller::new(
            out_dir.path().to_path_buf(),
            "x".into(),
            BuildOptions::default(),
        );
        let text = run(&mut c, "name   two  spaces.calico  \nname\n");
        assert_eq!(c.output_name(), "two  spaces.calico");
        assert_eq!(text.matches("output name: two  spaces.calico").count(), 2);
    }

    #[test]
    fn shell_says_when_selection_is_full() {
        let out_dir = TempDir::new().unwrap();
        let mut c = Controller::new(
            out_dir.path().to_path_buf(),
            "x".into(),
            BuildOptions::default(),
        );
        let first: Vec<String> = (0..MAX_FILES - 1).map(|i| format!("f{i}")).collect();
        let text = run(&mut c, &format!("add {}\n", first.join(" ")));
        assert!(!text.contains("selection is full"));

        let text = run(&mut c, "add last\n");
        assert!(text.contains("selection is full"));
        assert!(!text.contains(LIMIT_WARNING));

        let text = run(&mut c, "add extra\n");
        assert!(text.contains(LIMIT_WARNING));
    }

    #[test]
    fn output_dir_is_created_on_demand() {
        let root = TempDir::new().unwrap();
        let dir = root.path().join("output");
        ensure_output_dir(&dir).unwrap();
        assert!(dir.is_dir());
        ensure_output_dir(&dir).unwrap();
    }
}
