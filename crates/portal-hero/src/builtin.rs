//! Built-in hero translations for the four supported languages.

use crate::language::Language;
use crate::phrase::{PhraseList, StatEntry, TranslationBundle};

/// Build the bundle shipped for `language`.
pub(crate) fn bundle(language: Language) -> TranslationBundle {
    match language {
        Language::English => english(),
        Language::Hindi => hindi(),
        Language::Assamese => assamese(),
        Language::Bengali => bengali(),
    }
}

fn english() -> TranslationBundle {
    TranslationBundle {
        headline: PhraseList::from_array([
            "DPR ASSESSMENT IN",
            "PROJECT ANALYSIS IN",
            "DETAILED REPORT IN",
        ]),
        subtitle: PhraseList::from_array([
            "AI-powered project evaluation supporting all Northeast Indian languages and communities",
            "Smart project insights across India's Northeast states",
            "Empowering regional innovation with AI-driven assessments",
        ]),
        made_simple: PhraseList::from_array([
            "MADE SIMPLE",
            "SIMPLIFIED FOR YOU",
            "FASTER. SMARTER. EASIER.",
        ]),
        stats: vec![
            StatEntry::from_arrays(
                ["120+", "150+", "200+"],
                ["Projects Evaluated", "Projects Reviewed", "Assessments Completed"],
            ),
            StatEntry::from_arrays(
                ["8", "9", "7"],
                ["States Covered", "Regions Reached", "Zones Supported"],
            ),
            StatEntry::from_arrays(
                ["5+", "10+", "15+"],
                ["Schemes Supported", "Government Schemes", "Development Initiatives"],
            ),
        ],
        cta: PhraseList::from_array(["Start Assessment", "Begin Now", "Let's Go"]),
    }
}

fn hindi() -> TranslationBundle {
    TranslationBundle {
        headline: PhraseList::from_array(["डीपीआर मूल्यांकन", "परियोजना विश्लेषण", "विस्तृत रिपोर्ट"]),
        subtitle: PhraseList::from_array([
            "पूर्वोत्तर भारत की सभी भाषाओं और समुदायों के लिए एआई-संचालित परियोजना मूल्यांकन",
            "पूर्वोत्तर राज्यों में स्मार्ट परियोजना अंतर्दृष्टि",
            "एआई-आधारित आकलनों के साथ क्षेत्रीय नवाचार को सशक्त बनाना",
        ]),
        made_simple: PhraseList::from_array(["आसान बनाया गया", "आपके लिए सरल", "तेज़. स्मार्ट. आसान."]),
        stats: vec![
            StatEntry::from_arrays(
                ["१२०+", "१५०+", "२००+"],
                ["परियोजनाओं का मूल्यांकन", "परियोजनाओं की समीक्षा", "पूर्ण आकलन"],
            ),
            StatEntry::from_arrays(
                ["८", "९", "७"],
                ["राज्य कवर", "क्षेत्र पहुँचे", "क्षेत्र समर्थित"],
            ),
            StatEntry::from_arrays(
                ["५+", "१०+", "१५+"],
                ["योजनाएं समर्थित", "सरकारी योजनाएं", "विकास पहल"],
            ),
        ],
        cta: PhraseList::from_array(["मूल्यांकन शुरू करें", "अभी प्रारंभ करें", "चलिए शुरू करें"]),
    }
}

fn assamese() -> TranslationBundle {
    TranslationBundle {
        headline: PhraseList::from_array(["ডিপিআৰ মূল্যায়ন", "প্ৰকল্প বিশ্লেষণ", "বিস্তারিত প্ৰতিবেদন"]),
        subtitle: PhraseList::from_array([
            "উত্তৰ পূৰ্ব ভাৰতৰ সকলো ভাষা আৰু সমাজৰ বাবে AI-ভিত্তিক প্ৰকল্প মূল্যায়ন",
            "উত্তৰ পূৰ্ব ৰাজ্যসমূহত বুদ্ধিমান প্ৰকল্প অন্তৰ্দৃষ্টি",
            "AI-চালিত মূল্যায়নৰ জৰিয়তে আঞ্চলিক উদ্ভাৱন শক্তিশালীকৰণ",
        ]),
        made_simple: PhraseList::from_array(["সহজ কৰা হৈছে", "আপোনাৰ বাবে সহজ", "দ্ৰুত. বুদ্ধিমান. সহজ."]),
        stats: vec![
            StatEntry::from_arrays(
                ["১২০+", "১৫০+", "২০০+"],
                ["প্ৰকল্প মূল্যায়ন", "প্ৰকল্প পৰ্যালোচনা", "সম্পন্ন মূল্যায়ন"],
            ),
            StatEntry::from_arrays(
                ["৮", "৯", "৭"],
                ["আবৃত ৰাজ্য", "পৌঁছা অঞ্চল", "সমৰ্থিত জোন"],
            ),
            StatEntry::from_arrays(
                ["৫+", "১০+", "১৫+"],
                ["সমৰ্থিত আঁচনি", "সরকাৰী আঁচনি", "বিকাশ উদ্যোগ"],
            ),
        ],
        cta: PhraseList::from_array(["মূল্যায়ন আৰম্ভ কৰক", "এতিয়া আৰম্ভ কৰক", "চলো যাওঁ"]),
    }
}

fn bengali() -> TranslationBundle {
    TranslationBundle {
        headline: PhraseList::from_array(["ডিপিআর মূল্যায়ন", "প্রকল্প বিশ্লেষণ", "বিস্তারিত প্রতিবেদন"]),
        subtitle: PhraseList::from_array([
            "উত্তর-পূর্ব ভারতের সব ভাষা ও সম্প্রদায়ের জন্য এআই-চালিত প্রকল্প মূল্যায়ন",
            "উত্তর-পূর্ব রাজ্যগুলিতে স্মার্ট প্রকল্প অন্তর্দৃষ্টি",
            "এআই-চালিত মূল্যায়নের মাধ্যমে আঞ্চলিক উদ্ভাবনকে শক্তিশালী করা",
        ]),
        made_simple: PhraseList::from_array(["সহজ করে তোলা", "আপনার জন্য সহজ", "দ্রুত. স্মার্ট. সহজ."]),
        stats: vec![
            StatEntry::from_arrays(
                ["১২০+", "১৫০+", "২০০+"],
                ["মূল্যায়িত প্রকল্প", "সমীক্ষিত প্রকল্প", "সম্পূর্ণ মূল্যায়ন"],
            ),
            StatEntry::from_arrays(
                ["৮", "৯", "৭"],
                ["রাজ্য কভার", "অঞ্চল পৌঁছেছে", "সমর্থিত অঞ্চল"],
            ),
            StatEntry::from_arrays(
                ["৫+", "১০+", "১৫+"],
                ["সহায়ক প্রকল্প", "সরকারি প্রকল্প", "উন্নয়ন উদ্যোগ"],
            ),
        ],
        cta: PhraseList::from_array(["মূল্যায়ন শুরু করুন", "এখনই শুরু করুন", "চলুন যাই"]),
    }
}
