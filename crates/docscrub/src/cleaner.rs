// ABOUTME: Cleaner applies the enabled DOM cleanup rules to a Document in a fixed order.
// ABOUTME: Each rule is idempotent; later rules see the tree as left by earlier ones.

use tracing::{debug, info};

use crate::dom::cleaners;
use crate::dom::Document;
use crate::options::CleanerOptions;

/// Ordered cleanup pipeline.
///
/// Order: div unwrap, `lang` removal, empty tables, empty colgroups,
/// class/id removal, image-paragraph wrap, span unwrap, image removal,
/// answer paragraphs, empty-tag sweep. Wrapping must precede image removal
/// since it looks for paragraphs that still contain an `img`.
#[derive(Debug, Clone, Default)]
pub struct Cleaner {
    options: CleanerOptions,
}

impl Cleaner {
    pub fn new(options: CleanerOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &CleanerOptions {
        &self.options
    }

    /// Runs the pipeline and hands the same tree back.
    pub fn clean<'a>(&self, doc: &'a mut Document) -> &'a mut Document {
        self.clean_with_wrap(doc, self.options.wrap_images)
    }

    /// Runs the pipeline with the image-wrap toggle overridden.
    pub fn clean_with_wrap<'a>(&self, doc: &'a mut Document, wrap_images: bool) -> &'a mut Document {
        let opts = &self.options;
        let exercise = opts.exercise_class.as_str();

        if opts.remove_divs {
            log_rule("remove_all_divs", cleaners::remove_all_divs(doc, exercise));
        }
        if opts.remove_lang {
            log_rule("remove_lang_attributes", cleaners::remove_lang_attributes(doc));
        }
        if opts.clean_empty_tables {
            log_rule("clean_empty_tables", cleaners::clean_empty_tables(doc));
        }
        if opts.clean_empty_colgroups {
            log_rule("clean_empty_colgroups", cleaners::clean_empty_colgroups(doc));
        }
        if opts.remove_classes {
            log_rule("remove_all_classes", cleaners::remove_all_classes(doc, exercise));
        }
        if opts.remove_ids {
            log_rule("remove_all_ids", cleaners::remove_all_ids(doc));
        }
        if wrap_images {
            log_rule(
                "wrap_paragraph_with_div",
                cleaners::wrap_paragraph_with_div(doc, exercise),
            );
        }
        if opts.remove_spans {
            log_rule("remove_spans_tags", cleaners::remove_spans_tags(doc));
        }
        if opts.remove_imgs {
            log_rule("remove_imgs_tags", cleaners::remove_imgs_tags(doc));
        }
        if opts.remove_answers {
            log_rule(
                "remove_answers",
                cleaners::remove_answers(doc, &opts.answer_prefixes),
            );
        }
        if opts.remove_empty_tags {
            log_rule("remove_empty_tags", cleaners::remove_empty_tags(doc));
        }

        info!("cleaned HTML content");
        doc
    }
}

fn log_rule(rule: &str, touched: usize) {
    debug!(rule, touched, "cleanup rule applied");
}
