//! Portrait sources
//!
//! A source resolves an article title to an image URL and downloads it.
//! Both steps log their own failures and report absence with `None`.

pub(crate) mod wikipedia;

use image::DynamicImage;

pub(crate) use wikipedia::WikipediaSource;

pub(crate) trait ImageSource {
    /// Find a representative image URL for the article
    fn locate(&self, title: &str) -> Option<String>;

    /// Download and decode the image behind `url`
    fn fetch(&self, url: &str) -> Option<DynamicImage>;
}
