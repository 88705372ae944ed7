use serde::Serialize;

/// Bande qualitative d'une somme. Seuils fixes : 120 / 160 / 180.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SumTag {
    Low,
    Mid,
    High,
    VeryHigh,
}

impl SumTag {
    pub fn class_name(&self) -> &'static str {
        match self {
            SumTag::Low => "tag-low",
            SumTag::Mid => "tag-mid",
            SumTag::High => "tag-high",
            SumTag::VeryHigh => "tag-very-high",
        }
    }
}

pub fn sum_tag(sum: i64) -> SumTag {
    if sum <= 120 {
        SumTag::Low
    } else if sum <= 160 {
        SumTag::Mid
    } else if sum <= 180 {
        SumTag::High
    } else {
        SumTag::VeryHigh
    }
}

/// Couleur d'une boule, par dizaine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum BallBand {
    Yellow,
    Blue,
    Red,
    Green,
    GrayGreen,
}

impl BallBand {
    pub fn class_name(&self) -> &'static str {
        match self {
            BallBand::Yellow => "ball-y",
            BallBand::Blue => "ball-b",
            BallBand::Red => "ball-r",
            BallBand::Green => "ball-g",
            BallBand::GrayGreen => "ball-gn",
        }
    }
}

pub fn ball_band(n: i64) -> BallBand {
    if n <= 10 {
        BallBand::Yellow
    } else if n <= 20 {
        BallBand::Blue
    } else if n <= 30 {
        BallBand::Red
    } else if n <= 40 {
        BallBand::Green
    } else {
        BallBand::GrayGreen
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BallToken {
    pub value: i64,
    pub band: BallBand,
}

/// `None` pour un jeton non entier : rien n'est affiché.
pub fn ball_token(raw: &str) -> Option<BallToken> {
    let value = raw.trim().parse::<i64>().ok()?;
    Some(BallToken {
        value,
        band: ball_band(value),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sum_tag_boundaries() {
        assert_eq!(sum_tag(i64::MIN), SumTag::Low);
        assert_eq!(sum_tag(0), SumTag::Low);
        assert_eq!(sum_tag(120), SumTag::Low);
        assert_eq!(sum_tag(121), SumTag::Mid);
        assert_eq!(sum_tag(160), SumTag::Mid);
        assert_eq!(sum_tag(161), SumTag::High);
        assert_eq!(sum_tag(180), SumTag::High);
        assert_eq!(sum_tag(181), SumTag::VeryHigh);
        assert_eq!(sum_tag(i64::MAX), SumTag::VeryHigh);
    }

    #[test]
    fn test_ball_band_ranges() {
        assert_eq!(ball_band(1), BallBand::Yellow);
        assert_eq!(ball_band(10), BallBand::Yellow);
        assert_eq!(ball_band(11), BallBand::Blue);
        assert_eq!(ball_band(20), BallBand::Blue);
        assert_eq!(ball_band(21), BallBand::Red);
        assert_eq!(ball_band(30), BallBand::Red);
        assert_eq!(ball_band(31), BallBand::Green);
        assert_eq!(ball_band(40), BallBand::Green);
        assert_eq!(ball_band(41), BallBand::GrayGreen);
        assert_eq!(ball_band(45), BallBand::GrayGreen);
    }

    #[test]
    fn test_ball_token_non_numeric() {
        assert_eq!(ball_token("abc"), None);
        assert_eq!(ball_token(""), None);
        assert_eq!(ball_token("4.5"), None);
    }

    #[test]
    fn test_ball_token_numeric() {
        let token = ball_token(" 33 ").unwrap();
        assert_eq!(token.value, 33);
        assert_eq!(token.band, BallBand::Green);
    }

    #[test]
    fn test_class_names() {
        assert_eq!(SumTag::VeryHigh.class_name(), "tag-very-high");
        assert_eq!(BallBand::GrayGreen.class_name(), "ball-gn");
    }
}
