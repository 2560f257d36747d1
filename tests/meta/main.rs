//! Layout checks for the unit test tree
//!
//! `tests/unit` mirrors `src/` file for file, every mirrored file holds at
//! least one test, and every file is reachable through a `mod` declaration.

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::fs;
    use std::io;
    use std::path::{Path, PathBuf};

    const SRC: &str = "src";
    const UNIT: &str = "tests/unit";

    // Files that only wire modules together
    fn is_module_root(path: &Path) -> bool {
        matches!(
            path.file_name().and_then(|name| name.to_str()),
            Some("main.rs" | "lib.rs" | "mod.rs")
        )
    }

    fn rust_files(root: &Path) -> io::Result<BTreeSet<PathBuf>> {
        let mut found = BTreeSet::new();
        let mut pending = vec![root.to_path_buf()];
        while let Some(dir) = pending.pop() {
            for entry in fs::read_dir(&dir)? {
                let path = entry?.path();
                if path.is_dir() {
                    pending.push(path);
                } else if path.extension().is_some_and(|ext| ext == "rs") {
                    let relative = path.strip_prefix(root).map_err(io::Error::other)?;
                    found.insert(relative.to_path_buf());
                }
            }
        }
        Ok(found)
    }

    fn leaf_files(root: &str) -> BTreeSet<PathBuf> {
        rust_files(Path::new(root))
            .unwrap()
            .into_iter()
            .filter(|path| !is_module_root(path))
            .collect()
    }

    fn listing(paths: &[&PathBuf], prefix: &str) -> String {
        paths
            .iter()
            .map(|path| format!("  - {prefix}/{}", path.display()))
            .collect::<Vec<_>>()
            .join("\n")
    }

    // Names a module file must declare: sibling files and subdirectories
    fn expected_modules(dir: &Path) -> BTreeSet<String> {
        fs::read_dir(dir)
            .unwrap()
            .map(|entry| entry.unwrap().path())
            .filter(|path| path.is_dir() || (path.extension().is_some_and(|ext| ext == "rs") && !is_module_root(path)))
            .filter_map(|path| path.file_stem().and_then(|stem| stem.to_str()).map(str::to_string))
            .collect()
    }

    fn declared_modules(file: &Path) -> BTreeSet<String> {
        fs::read_to_string(file)
            .unwrap()
            .lines()
            .map(str::trim)
            .filter_map(|line| line.strip_prefix("pub ").unwrap_or(line).strip_prefix("mod "))
            .filter_map(|rest| rest.strip_suffix(';'))
            .map(str::to_string)
            .collect()
    }

    // Tests every source module has a unit test file at the same relative path
    #[test]
    fn test_src_modules_have_unit_files() {
        let units = leaf_files(UNIT);
        let sources = leaf_files(SRC);
        let missing: Vec<_> = sources.difference(&units).collect();

        assert!(
            missing.is_empty(),
            "source modules without unit tests:\n{}",
            listing(&missing, SRC)
        );
    }

    // Tests no unit test file outlives its source module
    #[test]
    fn test_unit_files_have_src_modules() {
        let units = leaf_files(UNIT);
        let sources = leaf_files(SRC);
        let orphaned: Vec<_> = units.difference(&sources).collect();

        assert!(
            orphaned.is_empty(),
            "unit test files with no source module:\n{}",
            listing(&orphaned, UNIT)
        );
    }

    // Tests each unit file and the end-to-end suite contain a test function
    #[test]
    fn test_unit_files_contain_tests() {
        let mut files: Vec<PathBuf> = leaf_files(UNIT)
            .into_iter()
            .map(|path| Path::new(UNIT).join(path))
            .collect();
        files.push(PathBuf::from("tests/pathing.rs"));

        let empty: Vec<_> = files
            .iter()
            .filter(|path| !fs::read_to_string(path).unwrap().contains("#[test]"))
            .collect();

        assert!(empty.is_empty(), "files without tests:\n{}", listing(&empty, "."));
    }

    // Tests every unit file is declared by its module root and so gets compiled
    #[test]
    fn test_unit_modules_are_declared() {
        let mut dirs = vec![PathBuf::from(UNIT)];
        let mut undeclared = Vec::new();
        while let Some(dir) = dirs.pop() {
            let root = if dir == Path::new(UNIT) {
                dir.join("main.rs")
            } else {
                dir.join("mod.rs")
            };
            let declared = declared_modules(&root);
            for name in expected_modules(&dir).difference(&declared) {
                undeclared.push(format!("  - {} does not declare `mod {name}`", root.display()));
            }
            for entry in fs::read_dir(&dir).unwrap() {
                let path = entry.unwrap().path();
                if path.is_dir() {
                    dirs.push(path);
                }
            }
        }

        assert!(undeclared.is_empty(), "undeclared unit modules:\n{}", undeclared.join("\n"));
    }
}
