// src/pipeline/crawl.rs

//! Documentation crawling pipeline.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use futures::StreamExt;
use futures::stream::FuturesUnordered;
use scraper::Html;

use crate::error::{AppError, Result};
use crate::models::{
    Config, CrawlReport, FailureStage, FetchedPage, Identifier, PageDocument, PageFailure,
    SavedDocument, SiteKind,
};
use crate::pipeline::frontier::Frontier;
use crate::services::{
    AstroPolicy, ContentExtractor, GeneratorDetector, HtmdConverter, LinkDiscoverer,
    MarkdownConverter, SitePolicy, normalize, policy_for, with_source_header,
};
use crate::storage::{DocumentStorage, LocalStorage};
use crate::utils::http::{Fetcher, HttpFetcher};

/// Result of visiting one scheduled identifier.
enum Visit {
    /// The page could not be fetched. It is not marked visited.
    FetchFailed(PageFailure),
    /// The page was fetched; its links are known even if saving failed.
    Fetched {
        identifier: Identifier,
        links: BTreeSet<Identifier>,
        result: std::result::Result<SavedDocument, PageFailure>,
    },
}

/// Breadth-first crawler over one documentation site.
pub struct Crawler {
    fetcher: Arc<dyn Fetcher>,
    storage: Arc<dyn DocumentStorage>,
    converter: Box<dyn MarkdownConverter>,
    extractor: ContentExtractor,
    max_concurrent: usize,
    source_header: bool,
}

impl Crawler {
    pub fn new(
        fetcher: Arc<dyn Fetcher>,
        storage: Arc<dyn DocumentStorage>,
        policy: &dyn SitePolicy,
    ) -> Result<Self> {
        Ok(Self {
            fetcher,
            storage,
            converter: Box::new(HtmdConverter::new()),
            extractor: ContentExtractor::new(policy)?,
            max_concurrent: 1,
            source_header: true,
        })
    }

    pub fn with_converter(mut self, converter: Box<dyn MarkdownConverter>) -> Self {
        self.converter = converter;
        self
    }

    /// Maximum number of pages in flight. Zero is treated as one.
    pub fn with_concurrency(mut self, max_concurrent: usize) -> Self {
        self.max_concurrent = max_concurrent.max(1);
        self
    }

    pub fn with_source_header(mut self, enabled: bool) -> Self {
        self.source_header = enabled;
        self
    }

    pub fn site_tag(&self) -> &'static str {
        self.extractor.site_tag()
    }

    /// Crawl every same-site page reachable from `root`.
    ///
    /// Per-page failures are recorded in the report, never returned.
    pub async fn run(&self, root: Identifier) -> Result<CrawlReport> {
        let links = LinkDiscoverer::new(root.clone())?;
        let mut frontier = Frontier::seeded(root.clone());
        let mut report = CrawlReport::new(root, self.site_tag());
        let mut file_owners: HashMap<String, Identifier> = HashMap::new();
        let mut in_flight = FuturesUnordered::new();

        loop {
            while in_flight.len() < self.max_concurrent {
                let Some(identifier) = frontier.pop() else {
                    break;
                };
                log::info!("Fetching {identifier}");
                in_flight.push(self.visit(identifier, &links));
            }

            let Some(visit) = in_flight.next().await else {
                break;
            };

            match visit {
                Visit::FetchFailed(failure) => {
                    log::warn!("Fetch failed for {}: {}", failure.url, failure.message);
                    report.record_failure(failure);
                }
                Visit::Fetched {
                    identifier,
                    links: found,
                    result,
                } => {
                    frontier.mark_visited(identifier);
                    let added = frontier.extend(found);
                    if added > 0 {
                        log::debug!(
                            "Queued {added} new page(s), {} pending",
                            frontier.pending_len()
                        );
                    }

                    match result {
                        Ok(saved) => {
                            let previous =
                                file_owners.insert(saved.file_name.clone(), saved.url.clone());
                            if let Some(owner) = previous {
                                if owner != saved.url {
                                    log::warn!(
                                        "{} overwrote {} (from {owner})",
                                        saved.url,
                                        saved.file_name
                                    );
                                }
                            }
                            log::info!("Saved {} -> {}", saved.url, saved.file_name);
                            report.saved.push(saved);
                        }
                        Err(failure) => {
                            log::warn!(
                                "Skipping {} ({:?}): {}",
                                failure.url,
                                failure.stage,
                                failure.message
                            );
                            report.record_failure(failure);
                        }
                    }
                }
            }
        }

        report.visited = frontier.into_visited();
        report.finish();
        Ok(report)
    }

    async fn visit(&self, identifier: Identifier, links: &LinkDiscoverer) -> Visit {
        let fetched = self.fetcher.fetch(&identifier).await.and_then(|page| {
            if page.body.trim().is_empty() {
                Err(AppError::fetch(identifier.as_str(), "empty response body"))
            } else {
                Ok(page)
            }
        });
        let page = match fetched {
            Ok(page) => page,
            Err(e) => {
                return Visit::FetchFailed(PageFailure {
                    url: identifier,
                    stage: FailureStage::Fetch,
                    message: e.to_string(),
                });
            }
        };

        let (found, document) = self.process_markup(&page, links);
        let result = match document {
            Ok(document) => self.persist(document).await,
            Err(failure) => Err(failure),
        };

        Visit::Fetched {
            identifier,
            links: found,
            result,
        }
    }

    /// Parse the page once and derive both its links and its Markdown.
    ///
    /// Kept synchronous: the parsed tree must not live across an await.
    fn process_markup(
        &self,
        page: &FetchedPage,
        links: &LinkDiscoverer,
    ) -> (
        BTreeSet<Identifier>,
        std::result::Result<PageDocument, PageFailure>,
    ) {
        let document = Html::parse_document(&page.body);
        let found = links.discover(&document, &page.url);
        (found, self.render(&document, page))
    }

    fn render(
        &self,
        document: &Html,
        page: &FetchedPage,
    ) -> std::result::Result<PageDocument, PageFailure> {
        let identifier = &page.identifier;
        let failure = |stage, e: AppError| PageFailure {
            url: identifier.clone(),
            stage,
            message: e.to_string(),
        };

        let region = self
            .extractor
            .extract_or_err(document, identifier.as_str())
            .map_err(|e| failure(FailureStage::Extract, e))?;
        log::debug!("{identifier}: content region '{}'", region.selector);

        let raw = self
            .converter
            .convert(&region.html)
            .map_err(|e| failure(FailureStage::Convert, e))?;

        let mut markdown = normalize(&raw);
        if self.source_header {
            markdown = with_source_header(&markdown, identifier.as_str());
        }

        Ok(PageDocument {
            identifier: identifier.clone(),
            title: self
                .extractor
                .title(document)
                .unwrap_or_else(|| identifier.to_string()),
            site_tag: self.site_tag(),
            markdown,
        })
    }

    async fn persist(
        &self,
        document: PageDocument,
    ) -> std::result::Result<SavedDocument, PageFailure> {
        let file_name = document.identifier.file_name();
        match self.storage.save(&file_name, &document.markdown).await {
            Ok(_) => Ok(SavedDocument {
                url: document.identifier,
                title: document.title,
                file_name,
                site_tag: document.site_tag.to_string(),
            }),
            Err(e) => Err(PageFailure {
                url: document.identifier,
                stage: FailureStage::Persist,
                message: e.to_string(),
            }),
        }
    }
}

/// Fetch a single page and guess its generator.
pub async fn detect_generator(fetcher: &dyn Fetcher, url: &Identifier) -> Result<Option<SiteKind>> {
    let page = fetcher.fetch(url).await?;
    let document = Html::parse_document(&page.body);
    Ok(GeneratorDetector::new().detect(&document))
}

/// Pick the site policy, probing the root page when the kind is `auto`.
pub async fn resolve_policy(
    kind: SiteKind,
    fetcher: &dyn Fetcher,
    root: &Identifier,
) -> Box<dyn SitePolicy> {
    if let Some(policy) = policy_for(kind) {
        return policy;
    }

    match detect_generator(fetcher, root).await {
        Ok(Some(detected)) => {
            log::info!("Detected {detected:?} site at {root}");
            policy_for(detected).unwrap_or_else(|| Box::new(AstroPolicy))
        }
        Ok(None) => {
            log::warn!("Could not detect the generator of {root}, assuming Astro");
            Box::new(AstroPolicy)
        }
        Err(e) => {
            log::warn!("Generator probe failed ({e}), assuming Astro");
            Box::new(AstroPolicy)
        }
    }
}

/// Run the documentation crawler from `root_url` into the configured
/// output directory.
pub async fn run_crawler(config: &Config, root_url: &str) -> Result<CrawlReport> {
    config.validate()?;
    let root = Identifier::parse(root_url)?;

    let fetcher: Arc<dyn Fetcher> = Arc::new(HttpFetcher::new(&config.crawler)?);
    let storage = Arc::new(LocalStorage::new(&config.output.dir));

    let policy = resolve_policy(config.site.generator, fetcher.as_ref(), &root).await;
    let crawler = Crawler::new(fetcher, storage.clone(), policy.as_ref())?
        .with_concurrency(config.crawler.max_concurrent)
        .with_source_header(config.output.source_header);

    log::info!(
        "Crawling {root} as {} into {}",
        crawler.site_tag(),
        storage.root_dir().display()
    );

    let report = crawler.run(root).await?;

    if config.output.write_report {
        match storage.write_report(&report).await {
            Ok(path) => log::info!("Report written to {}", path.display()),
            Err(e) => log::warn!("Failed to write crawl report: {e}"),
        }
    }

    log::info!(
        "Crawl finished in {:.1}s: {} visited, {} saved, {} fetch failure(s), {} page failure(s)",
        report.duration_secs(),
        report.visited.len(),
        report.saved.len(),
        report.fetch_failures.len(),
        report.page_failures.len()
    );

    Ok(report)
}
