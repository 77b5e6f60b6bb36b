//! The generation pass.
//!
//! Phased, single-threaded orchestration: normalize doclets, register a
//! link for every symbol, annotate signatures and breadcrumbs, compile the
//! sidebar once, then render pages — source listings first, then the
//! globals page, home page, one page per container symbol, and tutorials.
//!
//! Only output-directory creation aborts the run. A page that fails to
//! read or write is logged, counted, and skipped; the remaining pages are
//! still generated and the caller sees the failure count at the end.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use regex::Regex;
use serde_json::json;
use symdoc_config::{Config, RemoveQuotes};
use symdoc_links::{
    GLOBAL_LONGNAME, LinkRegistry, TypeLinker, ancestor_links, escape_html, resolve_doc_links,
};
use symdoc_model::{Doclet, DocletStore, Kind, Members, attach_module_symbols};
use symdoc_nav::NavEntry;

use crate::nav::build_nav;
use crate::output::{OutputError, OutputFs};
use crate::render::TemplateRenderer;
use crate::signature::{attribs_markup, function_signature, member_signature, needs_signature};
use crate::sources;
use crate::tutorial::{Tutorial, TutorialPages};

/// Per-run inputs that are not configuration.
#[derive(Debug, Default)]
pub struct PublishOptions {
    /// Output directory; nested under package name/version when a package
    /// doclet is present.
    pub destination: PathBuf,
    /// Pre-rendered README HTML for the home page.
    pub readme: Option<String>,
    /// Template static assets copied verbatim into the output directory.
    pub static_dir: Option<PathBuf>,
}

/// Error from a generation pass.
#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    /// The output directory could not be created.
    #[error(transparent)]
    Output(#[from] OutputError),
    /// Some pages could not be written; the rest of the site was generated.
    #[error("{failed} of {total} pages failed to write")]
    PagesFailed { failed: usize, total: usize },
}

/// What a successful pass produced.
#[derive(Debug)]
pub struct PublishSummary {
    /// Number of pages written.
    pub pages: usize,
    /// Effective output directory (after package nesting).
    pub outdir: PathBuf,
}

/// Drives one generation pass over a doclet collection.
pub struct Publisher<'a> {
    store: DocletStore,
    registry: LinkRegistry,
    renderer: &'a dyn TemplateRenderer,
    fs: &'a dyn OutputFs,
    config: &'a Config,
    nav: String,
    outdir: PathBuf,
    pages: usize,
    failed: usize,
}

impl<'a> Publisher<'a> {
    #[must_use]
    pub fn new(
        store: DocletStore,
        renderer: &'a dyn TemplateRenderer,
        fs: &'a dyn OutputFs,
        config: &'a Config,
    ) -> Self {
        Self {
            store,
            registry: LinkRegistry::new(),
            renderer,
            fs,
            config,
            nav: String::new(),
            outdir: PathBuf::new(),
            pages: 0,
            failed: 0,
        }
    }

    /// Run the pass.
    ///
    /// # Errors
    ///
    /// Returns [`PublishError::Output`] when the output directory cannot
    /// be created, and [`PublishError::PagesFailed`] when one or more
    /// pages failed to write after the rest of the site was generated.
    pub fn publish(
        mut self,
        options: &PublishOptions,
        tutorials: &Tutorial,
    ) -> Result<PublishSummary, PublishError> {
        // claim the home and globals filenames before any symbol can take
        // them; "index" is deliberately not registered as a longname since
        // a package may legitimately be called index
        let index_url = self.registry.unique_filename("index");
        let global_url = self.registry.unique_filename(GLOBAL_LONGNAME);
        self.registry.register(GLOBAL_LONGNAME, &global_url);

        self.store.prune();
        if self.config.sort {
            let spec = self.config.sort_spec();
            self.store.sort(&spec);
        }

        let source_paths = self.normalize_doclets();

        self.outdir = options.destination.clone();
        let package = self
            .store
            .find(|d| d.kind == Kind::Package)
            .first()
            .map(|p| (p.name.clone(), p.version.clone()));
        if let Some((name, version)) = package
            && !name.is_empty()
        {
            self.outdir.push(&name);
            if let Some(version) = version
                && !version.is_empty()
            {
                self.outdir.push(&version);
            }
        }
        self.fs.mkdir_all(&self.outdir)?;

        if let Some(static_dir) = &options.static_dir {
            self.copy_static(static_dir);
        }

        // shortened paths are what listings are titled and linked by
        let prefix = sources::common_prefix(&source_paths);
        let source_files: Vec<(String, String)> = source_paths
            .iter()
            .map(|path| (path.clone(), sources::shorten(path, &prefix)))
            .collect();
        self.register_links(&source_files);

        self.annotate_signatures();
        self.annotate_members();

        let members = Members::partition(&self.store);
        let tutorial_pages = TutorialPages::build(tutorials, &mut self.registry);
        let tutorial_entries: Vec<NavEntry> = tutorials
            .children
            .iter()
            .map(|t| NavEntry::bare(t.name.clone()))
            .collect();
        self.nav = build_nav(
            &self.store,
            &members,
            &tutorial_entries,
            &tutorial_pages,
            &self.registry,
            self.config,
            &index_url,
        );

        attach_module_symbols(&mut self.store);

        // listings first so every symbol page can already link to them
        if self.config.output_source_files {
            self.generate_source_files(&source_files);
        }

        if !members.globals.is_empty() {
            let globalobj = Doclet::unnamed(Kind::Globalobj, "");
            self.generate("", "Global", &[globalobj], &global_url, true);
        }

        self.generate_home_page(options, &index_url);
        self.generate_symbol_pages(&members);
        self.generate_tutorials(tutorials, &tutorial_pages);

        if self.failed > 0 {
            Err(PublishError::PagesFailed {
                failed: self.failed,
                total: self.pages,
            })
        } else {
            Ok(PublishSummary {
                pages: self.pages,
                outdir: self.outdir,
            })
        }
    }

    /// First pass over the collection: quote normalization, example
    /// caption splitting, `see` reference linking, and the source path
    /// table. Also resets presentation fields.
    fn normalize_doclets(&mut self) -> Vec<String> {
        let remove_quotes = self.config.remove_quotes;
        let caption_re = Regex::new(r"(?is)^\s*<caption>(.+?)</caption>\s*\n(.+)$").unwrap();
        let mut source_paths: Vec<String> = Vec::new();
        let mut seen_paths: HashSet<String> = HashSet::new();

        let Self { store, registry, .. } = &mut *self;
        store.each_mut(|doclet| {
            match remove_quotes {
                RemoveQuotes::All => {
                    doclet.name = doclet.name.replace(['"', '\''], "");
                    if let Some(longname) = &doclet.longname {
                        doclet.longname = Some(longname.replace(['"', '\''], ""));
                    }
                }
                RemoveQuotes::Trim => {
                    doclet.name = trim_quotes(&doclet.name);
                    if let Some(longname) = &doclet.longname {
                        doclet.longname = Some(trim_quotes(longname));
                    }
                }
                RemoveQuotes::None => {}
            }

            doclet.attribs = Some(String::new());

            for example in &mut doclet.examples {
                if !example.caption.is_empty() {
                    continue;
                }
                let code = example.code.clone();
                if let Some(captures) = caption_re.captures(&code) {
                    example.caption = captures[1].to_owned();
                    example.code = captures[2].to_owned();
                }
            }

            if !doclet.see.is_empty() {
                let items = std::mem::take(&mut doclet.see);
                let mut rewritten = Vec::with_capacity(items.len());
                for item in items {
                    rewritten.push(hash_to_link(registry, doclet, &item));
                }
                doclet.see = rewritten;
            }

            if let Some(path) = doclet.source_path()
                && seen_paths.insert(path.clone())
            {
                source_paths.push(path);
            }
        });

        source_paths
    }

    /// Register a URL for every symbol — before any page renders, so
    /// self-references and forward references resolve — and record each
    /// doclet's shortened source path.
    fn register_links(&mut self, source_files: &[(String, String)]) {
        let short_by_resolved: HashMap<&str, &str> = source_files
            .iter()
            .map(|(resolved, short)| (resolved.as_str(), short.as_str()))
            .collect();

        let Self { store, registry, .. } = &mut *self;
        store.each_mut(|doclet| {
            if let Some(longname) = doclet.longname.clone() {
                let url = registry.create_link(doclet);
                registry.register(&longname, &url);
            }
            if let Some(path) = doclet.source_path()
                && let Some(short) = short_by_resolved.get(path.as_str())
                && let Some(meta) = doclet.meta.as_mut()
            {
                meta.shortpath = Some((*short).to_owned());
            }
        });
    }

    /// Compute fragment ids and call signatures. Runs against the frozen
    /// registry, then applies the results in place.
    fn annotate_signatures(&mut self) {
        let mut patches: Vec<(usize, Option<String>, Option<String>, Option<String>)> = Vec::new();
        {
            let linker = TypeLinker::new(
                &self.store,
                &self.registry,
                self.config.compact_long_types,
                self.config.expand_short_types,
            );
            for (index, doclet) in self.store.iter().enumerate() {
                let Some(longname) = doclet.longname.as_deref() else {
                    continue;
                };
                let id = self.registry.resolve(longname).map(|url| {
                    url.rfind('#')
                        .map_or_else(|| doclet.name.clone(), |pos| url[pos + 1..].to_owned())
                });
                let (signature, attribs) = if needs_signature(doclet) {
                    (
                        Some(function_signature(doclet, &linker)),
                        Some(attribs_markup(doclet)),
                    )
                } else {
                    (None, None)
                };
                patches.push((index, id, signature, attribs));
            }
        }
        for (index, id, signature, attribs) in patches {
            if let Some(doclet) = self.store.get_mut(index) {
                if id.is_some() {
                    doclet.id = id;
                }
                if signature.is_some() {
                    doclet.signature = signature;
                }
                if attribs.is_some() {
                    doclet.attribs = attribs;
                }
            }
        }
    }

    /// Compute ancestor breadcrumbs and member type annotations after all
    /// URLs exist. Constants display as members from here on.
    fn annotate_members(&mut self) {
        struct Patch {
            index: usize,
            ancestors: Vec<String>,
            signature: Option<String>,
            attribs: Option<String>,
            to_member: bool,
        }

        let mut patches: Vec<Patch> = Vec::new();
        {
            let linker = TypeLinker::new(
                &self.store,
                &self.registry,
                self.config.compact_long_types,
                self.config.expand_short_types,
            );
            for (index, doclet) in self.store.iter().enumerate() {
                let ancestors = ancestor_links(&self.store, &self.registry, doclet);
                let annotate = matches!(doclet.kind, Kind::Member | Kind::Constant);
                patches.push(Patch {
                    index,
                    ancestors,
                    signature: annotate.then(|| member_signature(doclet, &linker)),
                    attribs: annotate.then(|| attribs_markup(doclet)),
                    to_member: doclet.kind == Kind::Constant,
                });
            }
        }
        for patch in patches {
            if let Some(doclet) = self.store.get_mut(patch.index) {
                doclet.ancestors = patch.ancestors;
                if patch.signature.is_some() {
                    doclet.signature = patch.signature;
                }
                if patch.attribs.is_some() {
                    doclet.attribs = patch.attribs;
                }
                if patch.to_member {
                    doclet.kind = Kind::Member;
                }
            }
        }
    }

    fn copy_static(&mut self, static_dir: &Path) {
        let files = match self.fs.list(static_dir, 3) {
            Ok(files) => files,
            Err(e) => {
                tracing::warn!(dir = %static_dir.display(), error = %e, "Failed to scan static assets");
                return;
            }
        };
        for file in files {
            let Ok(relative) = file.strip_prefix(static_dir) else {
                continue;
            };
            let target = self.outdir.join(relative);
            if let Some(parent) = target.parent()
                && let Err(e) = self.fs.mkdir_all(parent)
            {
                tracing::warn!(file = %file.display(), error = %e, "Failed to create asset directory");
                continue;
            }
            if let Err(e) = self.fs.copy(&file, &target) {
                tracing::warn!(file = %file.display(), error = %e, "Failed to copy static asset");
            }
        }
    }

    /// Pretty-printed listing pages, one per distinct source file. A file
    /// that cannot be read skips only its own listing.
    fn generate_source_files(&mut self, source_files: &[(String, String)]) {
        for (resolved, short) in source_files {
            let filename = self.registry.unique_filename(short);
            self.registry.register(short, &filename);

            let text = match self.fs.read(Path::new(resolved)) {
                Ok(text) => text,
                Err(e) => {
                    tracing::error!(file = %resolved, error = %e, "Failed to read source file, skipping listing");
                    continue;
                }
            };
            let mut listing = Doclet::unnamed(Kind::Source, "");
            listing.code = Some(escape_html(&text).into_owned());
            self.generate("Source", short, &[listing], &filename, false);
        }
    }

    /// Home page: package info, README main page, and the file list.
    fn generate_home_page(&mut self, options: &PublishOptions, index_url: &str) {
        let mut docs: Vec<Doclet> = self
            .store
            .find(|d| d.kind == Kind::Package)
            .into_iter()
            .cloned()
            .collect();

        let mut mainpage = Doclet::unnamed(Kind::Mainpage, "");
        mainpage.readme = options.readme.clone();
        mainpage.longname = Some(
            self.config
                .main_page_title
                .clone()
                .unwrap_or_else(|| "Main Page".to_owned()),
        );
        docs.push(mainpage);

        docs.extend(self.store.find(|d| d.kind == Kind::File).into_iter().cloned());
        self.generate("", "Home", &docs, index_url, true);
    }

    /// One page per container symbol, per bucket.
    fn generate_symbol_pages(&mut self, members: &Members) {
        let buckets: [(&[usize], Kind, &str); 6] = [
            (&members.modules, Kind::Module, "Module"),
            (&members.classes, Kind::Class, "Class"),
            (&members.namespaces, Kind::Namespace, "Namespace"),
            (&members.mixins, Kind::Mixin, "Mixin"),
            (&members.externals, Kind::External, "External"),
            (&members.interfaces, Kind::Interface, "Interface"),
        ];

        for (indices, kind, label) in buckets {
            let mut generated: HashSet<String> = HashSet::new();
            let mut plans: Vec<(String, Vec<Doclet>, String)> = Vec::new();
            for &index in indices {
                let Some(doclet) = self.store.get(index) else {
                    continue;
                };
                let Some(longname) = doclet.longname.clone() else {
                    continue;
                };
                if !generated.insert(longname.clone()) {
                    continue;
                }
                let Some(url) = self.registry.resolve(&longname).map(str::to_owned) else {
                    tracing::warn!(longname = %longname, "No registered URL for symbol, skipping page");
                    continue;
                };
                let docs: Vec<Doclet> = self
                    .store
                    .find(|d| d.kind == kind && d.longname.as_deref() == Some(&longname))
                    .into_iter()
                    .cloned()
                    .collect();
                let Some(first) = docs.first() else {
                    continue;
                };
                plans.push((first.name.clone(), docs, url));
            }
            for (title, docs, url) in plans {
                self.generate(label, &title, &docs, &url, true);
            }
        }
    }

    fn generate_tutorials(&mut self, node: &Tutorial, pages: &TutorialPages) {
        for child in &node.children {
            let Some(url) = pages.url(&child.name).map(str::to_owned) else {
                continue;
            };
            let children: Vec<serde_json::Value> = child
                .children
                .iter()
                .map(|c| {
                    json!({
                        "name": c.name,
                        "title": c.title,
                        "url": pages.url(&c.name),
                    })
                })
                .collect();
            let model = json!({
                "title": format!("Tutorial: {}", child.title),
                "header": child.title,
                "content": child.content,
                "children": children,
                "nav": self.nav,
            });
            let html = self.renderer.render("tutorial", &model);
            let html = resolve_doc_links(&html, &self.registry);
            self.write_page(&url, &html);

            self.generate_tutorials(child, pages);
        }
    }

    /// Render one page model through the external engine and write it.
    fn generate(
        &mut self,
        type_label: &str,
        title: &str,
        docs: &[Doclet],
        filename: &str,
        resolve_links: bool,
    ) {
        let model = json!({
            "type": type_label,
            "title": title,
            "docs": docs,
            "nav": self.nav,
        });
        let mut html = self.renderer.render("container", &model);
        if resolve_links {
            html = resolve_doc_links(&html, &self.registry);
        }
        self.write_page(filename, &html);
    }

    fn write_page(&mut self, filename: &str, html: &str) {
        self.pages += 1;
        let path = self.outdir.join(filename);
        if let Err(e) = self.fs.write(&path, html) {
            self.failed += 1;
            tracing::error!(page = %filename, error = %e, "Failed to write page");
        }
    }
}

/// Strip one pair of surrounding double quotes, then one pair of single
/// quotes.
fn trim_quotes(name: &str) -> String {
    let name = name
        .strip_prefix('"')
        .and_then(|n| n.strip_suffix('"'))
        .unwrap_or(name);
    let name = name
        .strip_prefix('\'')
        .and_then(|n| n.strip_suffix('\''))
        .unwrap_or(name);
    name.to_owned()
}

/// Rewrite a `#`-prefixed cross reference into a link to that fragment of
/// the doclet's own page. Anything else passes through untouched.
fn hash_to_link(registry: &mut LinkRegistry, doclet: &Doclet, hash: &str) -> String {
    if !hash.starts_with('#') || hash.len() < 2 {
        return hash.to_owned();
    }
    let url = registry.create_link(doclet);
    let base = url.split('#').next().unwrap_or("");
    format!(r#"<a href="{base}{hash}">{hash}</a>"#)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use pretty_assertions::assert_eq;
    use serde_json::Value;
    use symdoc_model::{Example, Meta, Scope};

    use super::*;
    use crate::output::FsOutput;

    static_assertions::assert_impl_all!(PublishError: Send, Sync);

    /// Dumps the template name and page model so tests can assert on what
    /// the engine was handed.
    struct FakeRenderer;

    impl TemplateRenderer for FakeRenderer {
        fn render(&self, template: &str, model: &Value) -> String {
            format!("<!-- {template} -->\n{model}")
        }
    }

    /// Fails every write whose filename contains a marker.
    struct FailingFs {
        inner: FsOutput,
        marker: &'static str,
    }

    impl OutputFs for FailingFs {
        fn read(&self, path: &Path) -> Result<String, OutputError> {
            self.inner.read(path)
        }
        fn write(&self, path: &Path, content: &str) -> Result<(), OutputError> {
            if path.to_string_lossy().contains(self.marker) {
                return Err(OutputError {
                    path: path.to_path_buf(),
                    source: std::io::Error::other("disk full"),
                });
            }
            self.inner.write(path, content)
        }
        fn mkdir_all(&self, path: &Path) -> Result<(), OutputError> {
            self.inner.mkdir_all(path)
        }
        fn list(&self, dir: &Path, depth: usize) -> Result<Vec<PathBuf>, OutputError> {
            self.inner.list(dir, depth)
        }
        fn copy(&self, from: &Path, to: &Path) -> Result<(), OutputError> {
            self.inner.copy(from, to)
        }
    }

    fn widget_class(source: Option<&Path>) -> Vec<Doclet> {
        let mut class = Doclet::new(Kind::Class, "Widget").with_description("A widget.");
        if let Some(path) = source {
            class.meta = Some(Meta {
                path: path.parent().map(|p| p.to_string_lossy().into_owned()),
                filename: path
                    .file_name()
                    .map(|f| f.to_string_lossy().into_owned())
                    .unwrap_or_default(),
                ..Meta::default()
            });
        }
        vec![
            class,
            Doclet::new(Kind::Function, "run")
                .with_longname("Widget#run")
                .with_memberof("Widget")
                .with_scope(Scope::Instance),
            Doclet::new(Kind::Member, "count")
                .with_longname("Widget.count")
                .with_memberof("Widget")
                .with_scope(Scope::Static),
        ]
    }

    fn sample_store(source: Option<&Path>) -> DocletStore {
        let mut doclets = widget_class(source);
        doclets.push(Doclet::new(Kind::Module, "module:once"));
        doclets.push(
            Doclet::new(Kind::Function, "module:once").with_description("Run a thing once."),
        );
        doclets.push(Doclet::new(Kind::Function, "halt").with_scope(Scope::Global));
        DocletStore::new(doclets)
    }

    #[test]
    fn test_publish_writes_expected_pages() {
        let dir = tempfile::tempdir().unwrap();
        let source_file = dir.path().join("src/widget.js");
        std::fs::create_dir_all(source_file.parent().unwrap()).unwrap();
        std::fs::write(&source_file, "class Widget {}").unwrap();

        let config = Config::default();
        let fs = FsOutput;
        let publisher = Publisher::new(
            sample_store(Some(&source_file)),
            &FakeRenderer,
            &fs,
            &config,
        );
        let options = PublishOptions {
            destination: dir.path().join("out"),
            readme: Some("<p>readme</p>".to_owned()),
            static_dir: None,
        };
        let tutorials = Tutorial::root(vec![Tutorial::new("setup", "Setup", "<p>how</p>")]);

        let summary = publisher.publish(&options, &tutorials).unwrap();

        let out = dir.path().join("out");
        assert!(out.join("index.html").is_file());
        assert!(out.join("global.html").is_file());
        assert!(out.join("Widget.html").is_file());
        assert!(out.join("module-once.html").is_file());
        assert!(out.join("tutorial-setup.html").is_file());
        // shortened to its basename, listing page named after it
        assert!(out.join("widget.js.html").is_file());
        assert_eq!(summary.pages, 6);
        assert_eq!(summary.outdir, out);
    }

    #[test]
    fn test_publish_home_page_model() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        let fs = FsOutput;
        let publisher = Publisher::new(sample_store(None), &FakeRenderer, &fs, &config);
        let options = PublishOptions {
            destination: dir.path().to_path_buf(),
            readme: Some("<p>hello readme</p>".to_owned()),
            static_dir: None,
        };

        publisher.publish(&options, &Tutorial::root(vec![])).unwrap();

        let home = std::fs::read_to_string(dir.path().join("index.html")).unwrap();
        assert!(home.contains("hello readme"));
        assert!(home.contains("Main Page"));
        // the sidebar reaches every page model
        assert!(home.contains(r#"<a href=\"Widget.html\">Widget</a>"#));
    }

    #[test]
    fn test_publish_nav_lists_module_export_and_globals() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        let fs = FsOutput;
        let publisher = Publisher::new(sample_store(None), &FakeRenderer, &fs, &config);
        let options = PublishOptions {
            destination: dir.path().to_path_buf(),
            ..PublishOptions::default()
        };

        publisher.publish(&options, &Tutorial::root(vec![])).unwrap();

        let module_page =
            std::fs::read_to_string(dir.path().join("module-once.html")).unwrap();
        // attached export copy with the require() display form
        assert!(module_page.contains(r#"(require(\"once\"))"#));

        let global_page = std::fs::read_to_string(dir.path().join("global.html")).unwrap();
        assert!(global_page.contains(r#"<a href=\"global.html#halt\">halt</a>"#));
    }

    #[test]
    fn test_publish_nests_output_under_package() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        let fs = FsOutput;
        let mut package = Doclet::new(Kind::Package, "widgets");
        package.version = Some("1.2.0".to_owned());
        let store = DocletStore::new(vec![package, Doclet::new(Kind::Class, "Widget")]);
        let publisher = Publisher::new(store, &FakeRenderer, &fs, &config);
        let options = PublishOptions {
            destination: dir.path().to_path_buf(),
            ..PublishOptions::default()
        };

        let summary = publisher.publish(&options, &Tutorial::root(vec![])).unwrap();

        let nested = dir.path().join("widgets/1.2.0");
        assert_eq!(summary.outdir, nested);
        assert!(nested.join("index.html").is_file());
        assert!(nested.join("Widget.html").is_file());
    }

    #[test]
    fn test_publish_missing_source_skips_only_that_listing() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("gone/widget.js");
        let config = Config::default();
        let fs = FsOutput;
        let publisher = Publisher::new(
            sample_store(Some(&missing)),
            &FakeRenderer,
            &fs,
            &config,
        );
        let options = PublishOptions {
            destination: dir.path().join("out"),
            ..PublishOptions::default()
        };

        let summary = publisher.publish(&options, &Tutorial::root(vec![])).unwrap();

        let out = dir.path().join("out");
        assert!(!out.join("widget.js.html").exists());
        assert!(out.join("Widget.html").is_file());
        assert_eq!(summary.pages, 4);
    }

    #[test]
    fn test_publish_write_failure_reported_but_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        let fs = FailingFs {
            inner: FsOutput,
            marker: "Widget",
        };
        let publisher = Publisher::new(sample_store(None), &FakeRenderer, &fs, &config);
        let options = PublishOptions {
            destination: dir.path().to_path_buf(),
            ..PublishOptions::default()
        };

        let err = publisher
            .publish(&options, &Tutorial::root(vec![]))
            .unwrap_err();

        assert!(matches!(
            err,
            PublishError::PagesFailed {
                failed: 1,
                total: 4
            }
        ));
        // the rest of the site still generated
        assert!(dir.path().join("index.html").is_file());
        assert!(dir.path().join("module-once.html").is_file());
    }

    #[test]
    fn test_publish_rewrites_see_hash_references() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        let fs = FsOutput;
        let mut doclets = widget_class(None);
        doclets[0].see = vec!["#count".to_owned(), "Widget.count".to_owned()];
        let publisher = Publisher::new(DocletStore::new(doclets), &FakeRenderer, &fs, &config);
        let options = PublishOptions {
            destination: dir.path().to_path_buf(),
            ..PublishOptions::default()
        };

        publisher.publish(&options, &Tutorial::root(vec![])).unwrap();

        let page = std::fs::read_to_string(dir.path().join("Widget.html")).unwrap();
        assert!(page.contains(r#"<a href=\"Widget.html#count\">#count</a>"#));
        // non-hash references pass through untouched
        assert!(page.contains(r#""Widget.count""#));
    }

    #[test]
    fn test_publish_splits_example_captions() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        let fs = FsOutput;
        let mut doclets = widget_class(None);
        doclets[0].examples = vec![Example {
            caption: String::new(),
            code: "<caption>Basic use</caption>\nnew Widget();".to_owned(),
        }];
        let publisher = Publisher::new(DocletStore::new(doclets), &FakeRenderer, &fs, &config);
        let options = PublishOptions {
            destination: dir.path().to_path_buf(),
            ..PublishOptions::default()
        };

        publisher.publish(&options, &Tutorial::root(vec![])).unwrap();

        let page = std::fs::read_to_string(dir.path().join("Widget.html")).unwrap();
        assert!(page.contains(r#""caption":"Basic use""#));
        assert!(page.contains(r#""code":"new Widget();""#));
    }

    #[test]
    fn test_publish_copies_static_assets() {
        let dir = tempfile::tempdir().unwrap();
        let static_dir = dir.path().join("static");
        std::fs::create_dir_all(static_dir.join("styles")).unwrap();
        std::fs::write(static_dir.join("styles/site.css"), "body {}").unwrap();

        let config = Config::default();
        let fs = FsOutput;
        let publisher = Publisher::new(sample_store(None), &FakeRenderer, &fs, &config);
        let options = PublishOptions {
            destination: dir.path().join("out"),
            readme: None,
            static_dir: Some(static_dir),
        };

        publisher.publish(&options, &Tutorial::root(vec![])).unwrap();

        assert_eq!(
            std::fs::read_to_string(dir.path().join("out/styles/site.css")).unwrap(),
            "body {}"
        );
    }

    #[test]
    fn test_publish_nested_tutorials_get_pages() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        let fs = FsOutput;
        let publisher = Publisher::new(DocletStore::new(vec![]), &FakeRenderer, &fs, &config);
        let options = PublishOptions {
            destination: dir.path().to_path_buf(),
            ..PublishOptions::default()
        };
        let tutorials = Tutorial::root(vec![Tutorial::new("setup", "Setup", "<p>a</p>")
            .with_children(vec![Tutorial::new("setup-linux", "Linux", "<p>b</p>")])]);

        publisher.publish(&options, &tutorials).unwrap();

        assert!(dir.path().join("tutorial-setup.html").is_file());
        assert!(dir.path().join("tutorial-setup-linux.html").is_file());
        let parent = std::fs::read_to_string(dir.path().join("tutorial-setup.html")).unwrap();
        assert!(parent.contains("Tutorial: Setup"));
        assert!(parent.contains("tutorial-setup-linux.html"));
    }

    #[test]
    fn test_trim_quotes() {
        assert_eq!(trim_quotes(r#""name""#), "name");
        assert_eq!(trim_quotes("'name'"), "name");
        assert_eq!(trim_quotes(r#""'name'""#), "name");
        assert_eq!(trim_quotes(r#"na"me"#), "na\"me");
    }
}
