//! Fixed lookup tables consulted by the committee's tools.
//!
//! Keys are matched after trimming and lowercasing. Every table has a
//! default for keys it does not know.

pub const DEFAULT_HEX_CODE: &str = "#808080";

pub const DEFAULT_COLOR_PSYCHOLOGY: &str = "This color resists conventional psychological \
     categorization, suggesting a sock of rare and enigmatic character.";

pub const DEFAULT_MBTI_COMPATIBILITY: &str = "This personality type is not yet catalogued by the \
     committee; compatibility must be assessed through careful observation of the sock drawer.";

pub const DEFAULT_ZODIAC_TRAITS: &str = "The stars are silent on this sign. The sock's destiny \
     remains unwritten and its traits are left to interpretation.";

const COLOR_HEX_CODES: &[(&str, &str)] = &[
    ("red", "#FF0000"),
    ("blue", "#0000FF"),
    ("green", "#008000"),
    ("black", "#000000"),
    ("white", "#FFFFFF"),
    ("yellow", "#FFFF00"),
    ("purple", "#800080"),
    ("orange", "#FFA500"),
    ("pink", "#FFC0CB"),
    ("gray", "#808080"),
    ("grey", "#808080"),
    ("brown", "#A52A2A"),
    ("navy", "#000080"),
];

const COLOR_PSYCHOLOGY: &[(&str, &str)] = &[
    (
        "red",
        "Red evokes passion, urgency and courage. A red sock announces itself and expects to be matched first.",
    ),
    (
        "blue",
        "Blue conveys calm, trust and stability. Blue socks are dependable partners with low drama.",
    ),
    (
        "green",
        "Green signals growth, balance and renewal. A green sock is patient and believes a match will come in season.",
    ),
    (
        "black",
        "Black projects elegance, authority and mystery. Black socks are formal, discreet and notoriously hard to tell apart.",
    ),
    (
        "white",
        "White represents purity, simplicity and new beginnings. White socks are optimistic despite constant exposure to grass stains.",
    ),
    (
        "yellow",
        "Yellow radiates optimism, energy and warmth. Yellow socks are sociable and brighten any drawer.",
    ),
    (
        "purple",
        "Purple is associated with royalty, creativity and wisdom. A purple sock expects to be treated with ceremony.",
    ),
    (
        "orange",
        "Orange expresses enthusiasm, adventure and playfulness. Orange socks thrive on spontaneity.",
    ),
    (
        "pink",
        "Pink suggests tenderness, compassion and nurture. Pink socks are natural caregivers to their partners.",
    ),
    (
        "gray",
        "Gray denotes neutrality, maturity and compromise. Gray socks are diplomats who match with almost anything.",
    ),
    (
        "grey",
        "Grey denotes neutrality, maturity and compromise. Grey socks are diplomats who match with almost anything.",
    ),
    (
        "brown",
        "Brown communicates reliability, comfort and earthiness. Brown socks are grounded and unpretentious.",
    ),
    (
        "navy",
        "Navy combines the authority of black with the trust of blue. Navy socks are quietly confident professionals.",
    ),
];

const MBTI_COMPATIBILITY: &[(&str, &str)] = &[
    ("intj", "INTJ socks pair best with ENFP or ENTP partners who can draw them out of the drawer's back corner."),
    ("intp", "INTP socks pair best with ENTJ or ESTJ partners who remember where they left them."),
    ("entj", "ENTJ socks pair best with INTP or INFP partners who tolerate being organized by color."),
    ("entp", "ENTP socks pair best with INFJ or INTJ partners who enjoy spirited debate in the laundry."),
    ("infj", "INFJ socks pair best with ENTP or ENFP partners who understand their quiet depth."),
    ("infp", "INFP socks pair best with ENFJ or ENTJ partners who appreciate their idealism."),
    ("enfj", "ENFJ socks pair best with INFP or ISFP partners who welcome their encouragement."),
    ("enfp", "ENFP socks pair best with INTJ or INFJ partners who ground their endless enthusiasm."),
    ("istj", "ISTJ socks pair best with ESFP or ESTP partners who add color to their routine."),
    ("isfj", "ISFJ socks pair best with ESFP or ESTP partners who appreciate their loyalty."),
    ("estj", "ESTJ socks pair best with ISTP or INTP partners who respect the folding schedule."),
    ("esfj", "ESFJ socks pair best with ISFP or ISTP partners who value harmony in the drawer."),
    ("istp", "ISTP socks pair best with ESTJ or ESFJ partners who give structure to their independence."),
    ("isfp", "ISFP socks pair best with ENFJ or ESFJ partners who admire their artistic weave."),
    ("estp", "ESTP socks pair best with ISFJ or ISTJ partners who keep them out of trouble."),
    ("esfp", "ESFP socks pair best with ISFJ or ISTJ partners who steady their love of the spotlight."),
];

const ZODIAC_TRAITS: &[(&str, &str)] = &[
    ("aries", "Aries socks are bold, energetic and always first out of the drawer."),
    ("taurus", "Taurus socks are loyal, comfort-seeking and resistant to being reassigned."),
    ("gemini", "Gemini socks are curious and adaptable, and frequently mistaken for their own twin."),
    ("cancer", "Cancer socks are nurturing and protective of their partner, and cling to the home drawer."),
    ("leo", "Leo socks are confident, generous and insist on being worn where they can be seen."),
    ("virgo", "Virgo socks are meticulous and analytical, and notice every loose thread."),
    ("libra", "Libra socks are harmonious and fair-minded, and seek perfect symmetry with a partner."),
    ("scorpio", "Scorpio socks are intense and devoted, and never forgive a lost partner."),
    ("sagittarius", "Sagittarius socks are adventurous and optimistic, and prone to vanishing on long journeys."),
    ("capricorn", "Capricorn socks are disciplined and ambitious, built for long careers in work boots."),
    ("aquarius", "Aquarius socks are independent and inventive, and happy to be worn mismatched."),
    ("pisces", "Pisces socks are intuitive and dreamy, and drift between laundry loads."),
];

fn lookup(table: &'static [(&'static str, &'static str)], key: &str, default: &'static str) -> &'static str {
    let key = key.trim().to_lowercase();
    table
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, v)| *v)
        .unwrap_or(default)
}

/// Hex code for a color name.
pub fn color_hex_code(color: &str) -> &'static str {
    lookup(COLOR_HEX_CODES, color, DEFAULT_HEX_CODE)
}

/// Psychological profile of a color.
pub fn color_psychology(color: &str) -> &'static str {
    lookup(COLOR_PSYCHOLOGY, color, DEFAULT_COLOR_PSYCHOLOGY)
}

/// Compatibility notes for a four-letter MBTI type.
pub fn mbti_compatibility(mbti_type: &str) -> &'static str {
    lookup(MBTI_COMPATIBILITY, mbti_type, DEFAULT_MBTI_COMPATIBILITY)
}

/// Character traits for a zodiac sign.
pub fn zodiac_traits(sign: &str) -> &'static str {
    lookup(ZODIAC_TRAITS, sign, DEFAULT_ZODIAC_TRAITS)
}
