use log::debug;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;
use ztp_template::cli::{Commands, RenderArgs, Runner, SourceArgs};

/// Prints a diff of files and their contents between two directories.
/// Shows files only present in one directory and content differences for files present in both.
///
/// # Arguments
/// * `dir1` - The first directory to compare (actual output).
/// * `dir2` - The second directory to compare (expected output).
pub fn print_dir_diff(dir1: &Path, dir2: &Path) {
    let mut files1 = std::collections::HashSet::new();
    let mut files2 = std::collections::HashSet::new();

    for entry in WalkDir::new(dir1)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.path().is_file())
    {
        files1.insert(entry.path().strip_prefix(dir1).unwrap().to_path_buf());
    }
    for entry in WalkDir::new(dir2)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.path().is_file())
    {
        files2.insert(entry.path().strip_prefix(dir2).unwrap().to_path_buf());
    }

    println!("\n=== Directory Comparison ===");
    println!("Actual output:   {:?}", dir1);
    println!("Expected output: {:?}", dir2);

    for file in files1.difference(&files2) {
        println!("  + {:?} (only in actual)", file);
    }
    for file in files2.difference(&files1) {
        println!("  - {:?} (only in expected)", file);
    }
    for file in files1.intersection(&files2) {
        let actual = fs::read_to_string(dir1.join(file)).unwrap_or_default();
        let expected = fs::read_to_string(dir2.join(file)).unwrap_or_default();
        if actual != expected {
            println!("\n  File: {:?}", file);
            println!("  --- Actual content:\n{actual}");
            println!("  --- Expected content:\n{expected}");
        }
    }
    println!("=== End of Comparison ===\n");
}

pub fn render_args(templates: &str, output_dir: &Path) -> RenderArgs {
    RenderArgs {
        source: SourceArgs {
            templates: templates.into(),
            dir: None,
            patterns: Vec::new(),
            verbose: 2,
        },
        names: Vec::new(),
        data: None,
        data_file: None,
        strict: true,
        output_dir: Some(output_dir.to_path_buf()),
        force: true,
    }
}

/// Renders `args` into its output directory, compares the result to the expected directory,
/// prints any differences, and asserts that the directories are identical.
///
/// # Arguments
/// * `args` - Render arguments; `output_dir` must be set.
/// * `expected_dir` - Path to the directory with expected output.
pub fn render_and_assert(args: RenderArgs, expected_dir: &str) {
    let output_dir = args.output_dir.clone().expect("output directory");
    Runner::new(Commands::Render(args)).run(&mut std::io::sink()).unwrap();
    match dir_diff::is_different(&output_dir, expected_dir) {
        Ok(true) => {
            print_dir_diff(&output_dir, expected_dir.as_ref());
            panic!("Directories differ. See above for details.");
        }
        Ok(false) => {}
        Err(e) => {
            debug!("Error comparing directories: {e:?}");
            panic!("Cannot compare directories");
        }
    }
}
