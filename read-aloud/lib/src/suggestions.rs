//! The fixed catalog of example texts offered to prefill the text buffer.

/// A titled example text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Suggestion {
    pub title: &'static str,
    pub content: &'static str,
}

/// The catalog, in display order.
pub const SUGGESTIONS: &[Suggestion] = &[
    Suggestion {
        title: "Narrate a story",
        content: "Once upon a time, in a kingdom far beyond the mountains, there lived a brave knight who embarked on an epic quest to save the realm from an ancient curse that had plagued the land for centuries. The knight's journey would take him through enchanted forests, across treacherous rivers, and into the heart of darkness itself, where he would face his greatest fears and discover the true meaning of courage.",
    },
    Suggestion {
        title: "Tell me a joke",
        content: "Why don't scientists trust atoms? Because they make up everything! Here's another one: I told my wife she was drawing her eyebrows too high. She looked surprised. And one more for good measure: Why don't eggs tell jokes? They'd crack each other up! I hope these brought a smile to your face.",
    },
    Suggestion {
        title: "Host a podcast",
        content: "Welcome to today's podcast episode where we'll be discussing the fascinating world of artificial intelligence, its impact on modern society, and how it's reshaping the way we work, communicate, and live our daily lives. Today we have some incredible insights to share about machine learning, natural language processing, and the future of human-AI collaboration.",
    },
    Suggestion {
        title: "Read the news",
        content: "Breaking news: Scientists have made a groundbreaking discovery in renewable energy technology that could revolutionize how we power our homes and cities, potentially reducing carbon emissions by up to 60% over the next decade. This breakthrough involves advanced solar panel efficiency and innovative battery storage solutions that promise to make clean energy more accessible and affordable for everyone.",
    },
    Suggestion {
        title: "Explain quantum physics",
        content: "Quantum physics is the branch of physics that deals with the behavior of matter and energy at the molecular, atomic, nuclear, and even smaller microscopic levels. It reveals a universe that operates on principles fundamentally different from our everyday experience, where particles can exist in multiple states simultaneously, and observation itself affects reality.",
    },
    Suggestion {
        title: "Describe a sunset",
        content: "As the golden sun slowly descended behind the rolling hills, painting the sky in brilliant shades of orange, pink, and purple, the gentle evening breeze carried the sweet fragrance of blooming jasmine across the tranquil meadow. The last rays of sunlight danced on the surface of the nearby lake, creating a shimmering pathway of light that seemed to lead directly to the horizon.",
    },
    Suggestion {
        title: "Schedule an appointment",
        content: "I'd like to schedule an appointment for next Tuesday at 2 PM. Please confirm if this time slot is available and let me know what information you'll need from me beforehand. I'm flexible with the timing if needed and can adjust to accommodate your schedule.",
    },
    Suggestion {
        title: "Product review",
        content: "This product exceeded my expectations in every way. The build quality is exceptional, the design is both elegant and functional, and the performance is outstanding. I've been using it for several months now and it continues to impress me with its reliability and ease of use. I would definitely recommend this to anyone looking for a high-quality solution.",
    },
];

/// All suggestions in display order.
pub fn suggestions() -> &'static [Suggestion] {
    SUGGESTIONS
}

/// The suggestion at `index`, if any.
pub fn suggestion(index: usize) -> Option<&'static Suggestion> {
    SUGGESTIONS.get(index)
}

/// Up to `len` suggestions starting at `start`, clipped to the catalog.
pub fn slice(start: usize, len: usize) -> &'static [Suggestion] {
    let start = start.min(SUGGESTIONS.len());
    let end = start.saturating_add(len).min(SUGGESTIONS.len());
    &SUGGESTIONS[start..end]
}
