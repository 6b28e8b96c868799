// Decorative backdrop: twinkling stars, the moon and the credit line.

use rand::Rng;
use web_sys::{Document, HtmlElement};

use super::dom::element;
use crate::error::ProposalError;

/// One star, positioned in percent of the page.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StarSpec {
    pub top_pct: f64,
    pub left_pct: f64,
    pub twinkle_s: f64,
}

pub fn star_field<R: Rng>(count: u32, rng: &mut R) -> Vec<StarSpec> {
    (0..count)
        .map(|_| StarSpec {
            top_pct: rng.gen_range(0.0..100.0),
            left_pct: rng.gen_range(0.0..100.0),
            twinkle_s: rng.gen_range(2.0..5.0),
        })
        .collect()
}

pub(crate) fn plant<R: Rng>(
    doc: &Document,
    page: &HtmlElement,
    star_count: u32,
    credit: &str,
    rng: &mut R,
) -> Result<(), ProposalError> {
    for star in star_field(star_count, rng) {
        let el = element(doc, "div", "vp-star")?;
        el.set_attribute(
            "style",
            &format!(
                "top:{:.2}%; left:{:.2}%; animation-duration:{:.2}s;",
                star.top_pct, star.left_pct, star.twinkle_s
            ),
        )?;
        page.append_child(&el)?;
    }
    let moon = element(doc, "div", "vp-moon")?;
    page.append_child(&moon)?;
    let credit_el = element(doc, "div", "vp-credit")?;
    credit_el.set_text_content(Some(credit));
    page.append_child(&credit_el)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_star_field_within_page() {
        let mut rng = StdRng::seed_from_u64(14);
        let stars = star_field(80, &mut rng);
        assert_eq!(stars.len(), 80);
        for s in &stars {
            assert!((0.0..100.0).contains(&s.top_pct));
            assert!((0.0..100.0).contains(&s.left_pct));
            assert!((2.0..5.0).contains(&s.twinkle_s));
        }
    }

    #[test]
    fn test_empty_star_field() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(star_field(0, &mut rng).is_empty());
    }
}
