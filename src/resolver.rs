//! Import path resolution.
//!
//! Maps an import path to the absolute directory holding its sources, walking
//! a fixed precedence ladder: the project's vendor directory, module
//! descriptor replacements, each search root in order, then the library root.
//! An import that matches none of them fails the whole build; a missing
//! dependency makes the remaining document meaningless, so nothing downstream
//! swallows the error.

use crate::context::ModuleContext;
use crate::error::{Error, Result};
use log::debug;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Resolves import paths against one [`ModuleContext`].
///
/// Results are cached for the lifetime of the resolver; the filesystem is not
/// expected to change mid-run.
pub struct Resolver<'a> {
    context: &'a ModuleContext,
    cache: HashMap<String, PathBuf>,
}

impl<'a> Resolver<'a> {
    pub fn new(context: &'a ModuleContext) -> Self {
        Self {
            context,
            cache: HashMap::new(),
        }
    }

    /// Resolve `import_path` to a source directory.
    ///
    /// Precedence, first match wins:
    /// 1. `<vendorRoot>/<importPath>`; vendoring beats everything, including
    ///    replacements.
    /// 2. A descriptor replacement entry, when the import lives under the
    ///    descriptor's own module path. The target is trusted as-is.
    /// 3. `<searchRoot>/src/<importPath>` for each search root in order.
    /// 4. `<libraryRoot>/src/<importPath>`.
    pub fn resolve(&mut self, import_path: &str) -> Result<PathBuf> {
        if let Some(hit) = self.cache.get(import_path) {
            return Ok(hit.clone());
        }

        let resolved = self.resolve_uncached(import_path)?;
        debug!("resolved {} -> {}", import_path, resolved.display());
        self.cache
            .insert(import_path.to_string(), resolved.clone());
        Ok(resolved)
    }

    fn resolve_uncached(&self, import_path: &str) -> Result<PathBuf> {
        let vendored = join_import(&self.context.vendor_root, import_path);
        if vendored.is_dir() {
            return Ok(vendored);
        }

        if let Some(replaced) = self.resolve_replacement(import_path) {
            return Ok(replaced);
        }

        for root in &self.context.search_roots {
            let candidate = join_import(&root.join("src"), import_path);
            if candidate.is_dir() {
                return Ok(candidate);
            }
        }

        let builtin = join_import(&self.context.library_root.join("src"), import_path);
        if builtin.is_dir() {
            return Ok(builtin);
        }

        Err(Error::Resolution {
            import: import_path.to_string(),
        })
    }

    /// Apply the first matching descriptor replacement, if any.
    ///
    /// Replacements only apply to imports under the descriptor's own module
    /// path. Entries are scanned in descriptor order; with duplicate or
    /// overlapping `old` paths the first match wins, so ordering follows the
    /// descriptor rather than specificity.
    fn resolve_replacement(&self, import_path: &str) -> Option<PathBuf> {
        let descriptor = self.context.descriptor.as_ref()?;
        if !path_has_prefix(import_path, &descriptor.module.path) {
            return None;
        }

        for entry in &descriptor.replace {
            if !path_has_prefix(import_path, &entry.old.path) {
                continue;
            }
            let rest = import_path[entry.old.path.len()..].trim_start_matches('/');

            let base = if entry.new.path.starts_with("./") || entry.new.path.starts_with("../") {
                // Local replacement, relative to the project root
                join_import(&self.context.project_root, &entry.new.path)
            } else {
                // Versioned module cache entry under the first search root.
                // A context without search roots has no module cache, so the
                // entry cannot apply.
                let first_root = match self.context.search_roots.first() {
                    Some(root) => root,
                    None => continue,
                };
                let cache_entry =
                    format!("{}@{}", escape_module_path(&entry.new.path), entry.new.version);
                join_import(&first_root.join("pkg").join("mod"), &cache_entry)
            };

            return Some(if rest.is_empty() {
                base
            } else {
                join_import(&base, rest)
            });
        }
        None
    }
}

/// Join a '/'-separated import path onto a filesystem base path.
fn join_import(base: &Path, import_path: &str) -> PathBuf {
    import_path
        .split('/')
        .filter(|seg| !seg.is_empty() && *seg != ".")
        .fold(base.to_path_buf(), |path, seg| path.join(seg))
}

/// Whether `path` equals `prefix` or sits under it as a '/'-delimited child.
fn path_has_prefix(path: &str, prefix: &str) -> bool {
    if prefix.is_empty() {
        return false;
    }
    match path.strip_prefix(prefix) {
        Some("") => true,
        Some(rest) => rest.starts_with('/'),
        None => false,
    }
}

/// Escape a module path for use in the module cache: each uppercase ASCII
/// letter becomes '!' followed by its lowercase form.
fn escape_module_path(path: &str) -> String {
    let mut escaped = String::with_capacity(path.len());
    for ch in path.chars() {
        if ch.is_ascii_uppercase() {
            escaped.push('!');
            escaped.push(ch.to_ascii_lowercase());
        } else {
            escaped.push(ch);
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{ModuleDescriptor, ModuleRef, Replacement};
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    /// A context over temp directories, with one search root by default.
    struct Fixture {
        _dirs: Vec<TempDir>,
        context: ModuleContext,
    }

    fn fixture(extra_roots: usize) -> Fixture {
        let project = TempDir::new().unwrap();
        let library = TempDir::new().unwrap();
        let mut dirs = vec![TempDir::new().unwrap()];
        for _ in 0..extra_roots {
            dirs.push(TempDir::new().unwrap());
        }
        let roots: Vec<PathBuf> = dirs.iter().map(|d| d.path().to_path_buf()).collect();

        let context = ModuleContext::new(
            roots,
            library.path().to_path_buf(),
            project.path().to_path_buf(),
            None,
        );
        dirs.push(project);
        dirs.push(library);
        Fixture {
            _dirs: dirs,
            context,
        }
    }

    fn mkdirs(base: &Path, rel: &str) -> PathBuf {
        let dir = join_import(base, rel);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_resolves_from_single_search_root() {
        let fx = fixture(0);
        let expected = mkdirs(&fx.context.search_roots[0].join("src"), "example.com/app/ctrl");

        let mut resolver = Resolver::new(&fx.context);
        assert_eq!(resolver.resolve("example.com/app/ctrl").unwrap(), expected);
    }

    #[test]
    fn test_search_roots_checked_in_order() {
        let fx = fixture(1);
        let first = mkdirs(&fx.context.search_roots[0].join("src"), "example.com/pkg");
        mkdirs(&fx.context.search_roots[1].join("src"), "example.com/pkg");

        let mut resolver = Resolver::new(&fx.context);
        assert_eq!(resolver.resolve("example.com/pkg").unwrap(), first);
    }

    #[test]
    fn test_vendor_wins_over_search_roots() {
        let fx = fixture(0);
        mkdirs(&fx.context.search_roots[0].join("src"), "example.com/pkg");
        let vendored = mkdirs(&fx.context.vendor_root, "example.com/pkg");

        let mut resolver = Resolver::new(&fx.context);
        assert_eq!(resolver.resolve("example.com/pkg").unwrap(), vendored);
    }

    #[test]
    fn test_vendor_wins_over_replacement() {
        let mut fx = fixture(0);
        fx.context.descriptor = Some(ModuleDescriptor {
            module: ModuleRef {
                path: "example.com/app".to_string(),
                version: String::new(),
            },
            replace: vec![Replacement {
                old: ModuleRef {
                    path: "example.com/app".to_string(),
                    version: String::new(),
                },
                new: ModuleRef {
                    path: "./elsewhere".to_string(),
                    version: String::new(),
                },
            }],
            ..Default::default()
        });
        let vendored = mkdirs(&fx.context.vendor_root, "example.com/app/ctrl");

        let mut resolver = Resolver::new(&fx.context);
        assert_eq!(resolver.resolve("example.com/app/ctrl").unwrap(), vendored);
    }

    #[test]
    fn test_local_replacement_resolves_relative_to_project() {
        let mut fx = fixture(0);
        fx.context.descriptor = Some(ModuleDescriptor {
            module: ModuleRef {
                path: "example.com/app".to_string(),
                version: String::new(),
            },
            replace: vec![Replacement {
                old: ModuleRef {
                    path: "example.com/app/ctrl".to_string(),
                    version: String::new(),
                },
                new: ModuleRef {
                    path: "./controllers".to_string(),
                    version: String::new(),
                },
            }],
            ..Default::default()
        });

        let mut resolver = Resolver::new(&fx.context);
        let resolved = resolver.resolve("example.com/app/ctrl/pets").unwrap();
        assert_eq!(resolved, fx.context.project_root.join("controllers").join("pets"));
    }

    #[test]
    fn test_cache_replacement_escapes_uppercase() {
        let mut fx = fixture(0);
        fx.context.descriptor = Some(ModuleDescriptor {
            module: ModuleRef {
                path: "example.com/app".to_string(),
                version: String::new(),
            },
            replace: vec![Replacement {
                old: ModuleRef {
                    path: "example.com/app".to_string(),
                    version: String::new(),
                },
                new: ModuleRef {
                    path: "github.com/Acme/app".to_string(),
                    version: "v1.2.0".to_string(),
                },
            }],
            ..Default::default()
        });

        let mut resolver = Resolver::new(&fx.context);
        let resolved = resolver.resolve("example.com/app/ctrl").unwrap();
        let expected = fx.context.search_roots[0]
            .join("pkg")
            .join("mod")
            .join("github.com")
            .join("!acme")
            .join("app@v1.2.0")
            .join("ctrl");
        assert_eq!(resolved, expected);
    }

    #[test]
    fn test_first_matching_replacement_wins() {
        let mut fx = fixture(0);
        let make = |old: &str, new: &str| Replacement {
            old: ModuleRef {
                path: old.to_string(),
                version: String::new(),
            },
            new: ModuleRef {
                path: new.to_string(),
                version: String::new(),
            },
        };
        fx.context.descriptor = Some(ModuleDescriptor {
            module: ModuleRef {
                path: "example.com/app".to_string(),
                version: String::new(),
            },
            replace: vec![
                make("example.com/app", "./first"),
                make("example.com/app/ctrl", "./second"),
            ],
            ..Default::default()
        });

        let mut resolver = Resolver::new(&fx.context);
        let resolved = resolver.resolve("example.com/app/ctrl").unwrap();
        assert_eq!(resolved, fx.context.project_root.join("first").join("ctrl"));
    }

    #[test]
    fn test_cache_replacement_without_search_roots_does_not_apply() {
        // Hand-built contexts may carry no search roots; a module-cache
        // replacement then has nowhere to point and must not panic.
        let project = TempDir::new().unwrap();
        let library = TempDir::new().unwrap();
        let context = ModuleContext::new(
            Vec::new(),
            library.path().to_path_buf(),
            project.path().to_path_buf(),
            Some(ModuleDescriptor {
                module: ModuleRef {
                    path: "example.com/app".to_string(),
                    version: String::new(),
                },
                replace: vec![Replacement {
                    old: ModuleRef {
                        path: "example.com/app".to_string(),
                        version: String::new(),
                    },
                    new: ModuleRef {
                        path: "github.com/acme/app".to_string(),
                        version: "v1.0.0".to_string(),
                    },
                }],
                ..Default::default()
            }),
        );

        let mut resolver = Resolver::new(&context);
        let err = resolver.resolve("example.com/app/ctrl").unwrap_err();
        match err {
            Error::Resolution { import } => assert_eq!(import, "example.com/app/ctrl"),
            other => panic!("expected Resolution error, got {:?}", other),
        }
    }

    #[test]
    fn test_replacement_ignored_outside_module_path() {
        let mut fx = fixture(0);
        fx.context.descriptor = Some(ModuleDescriptor {
            module: ModuleRef {
                path: "example.com/app".to_string(),
                version: String::new(),
            },
            replace: vec![Replacement {
                old: ModuleRef {
                    path: "example.com/other".to_string(),
                    version: String::new(),
                },
                new: ModuleRef {
                    path: "./elsewhere".to_string(),
                    version: String::new(),
                },
            }],
            ..Default::default()
        });
        let expected = mkdirs(&fx.context.search_roots[0].join("src"), "example.com/other");

        let mut resolver = Resolver::new(&fx.context);
        assert_eq!(resolver.resolve("example.com/other").unwrap(), expected);
    }

    #[test]
    fn test_library_root_is_searched_last() {
        let fx = fixture(0);
        let builtin = mkdirs(&fx.context.library_root.join("src"), "net/http");

        let mut resolver = Resolver::new(&fx.context);
        assert_eq!(resolver.resolve("net/http").unwrap(), builtin);
    }

    #[test]
    fn test_unresolvable_import_names_the_path() {
        let fx = fixture(0);

        let mut resolver = Resolver::new(&fx.context);
        let err = resolver.resolve("example.com/missing/pkg").unwrap_err();
        match err {
            Error::Resolution { import } => assert_eq!(import, "example.com/missing/pkg"),
            other => panic!("expected Resolution error, got {:?}", other),
        }
    }

    #[test]
    fn test_path_has_prefix_requires_segment_boundary() {
        assert!(path_has_prefix("a/b/c", "a/b"));
        assert!(path_has_prefix("a/b", "a/b"));
        assert!(!path_has_prefix("a/bc", "a/b"));
        assert!(!path_has_prefix("a/b", ""));
    }
}
