use std::collections::HashMap;

use proptest::prelude::*;
use rime_core::convert::{NoAux, ToneConverter};
use rime_dict::LineTransformer;
use rime_pinyin::{CorrectionTable, DefaultConverter, PinyinEngine, strip_tone};

const CHARS: [char; 12] = ['中', '国', '人', '山', '水', '火', '天', '地', '同', '意', '多', '能'];

fn word_strategy() -> impl Strategy<Value = Vec<char>> {
    prop::collection::vec(prop::sample::select(CHARS.to_vec()), 1..8)
}

fn aux() -> HashMap<char, String> {
    [('中', "zk"), ('人', "r"), ('水', "s"), ('同', "u")]
        .into_iter()
        .map(|(c, s)| (c, s.to_string()))
        .collect()
}

proptest! {
    #[test]
    fn one_token_per_character(chars in word_strategy()) {
        let corrections = CorrectionTable::new();
        let t = LineTransformer::new(PinyinEngine::new(&corrections, DefaultConverter), aux());
        let word: String = chars.iter().collect();
        let out = t.transform(1, &format!("{word}\tx")).unwrap();
        let (_, annotated) = out.split_once('\t').unwrap();
        prop_assert_eq!(annotated.split(' ').count(), chars.len());
    }

    #[test]
    fn stripping_codes_and_tones_restores_romanization(chars in word_strategy()) {
        let corrections = CorrectionTable::new();
        let t = LineTransformer::new(PinyinEngine::new(&corrections, DefaultConverter), aux());
        let word: String = chars.iter().collect();
        let romanization: Vec<String> = chars
            .iter()
            .map(|&c| strip_tone(&DefaultConverter.convert(c).unwrap()))
            .collect();
        let romanization = romanization.join(" ");

        let out = t.transform(1, &format!("{word}\t{romanization}")).unwrap();
        let (w, annotated) = out.split_once('\t').unwrap();
        prop_assert_eq!(w, word.as_str());
        let restored: Vec<String> = annotated
            .split(' ')
            .map(|tok| strip_tone(tok.split(';').next().unwrap()))
            .collect();
        prop_assert_eq!(restored.join(" "), romanization);
    }

    #[test]
    fn corrections_win_over_any_romanization(chars in word_strategy(), junk in "[a-z]{1,5}( [a-z]{1,5}){0,3}") {
        let word: String = chars.iter().collect();
        let stored: Vec<String> = (0..chars.len()).map(|i| format!("x{i}")).collect();
        let mut corrections = CorrectionTable::new();
        corrections.insert_phrase(&word, stored.clone()).unwrap();
        let t = LineTransformer::new(PinyinEngine::new(&corrections, DefaultConverter), NoAux);
        let out = t.transform(1, &format!("{word}\t{junk}")).unwrap();
        prop_assert_eq!(out, format!("{word}\t{}", stored.join(" ")));
    }
}
