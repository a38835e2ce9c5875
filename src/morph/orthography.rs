//! Двусторонняя орфография эсперанто: шесть диакритических букв
//! и их ASCII-диграфы с x. Сегментация работает только над x-нотацией,
//! исходное написание возвращается отдельным проходом.

/// Проверка на диакритическую букву, в обоих регистрах.
pub fn is_hat_letter(letter: char) -> bool {
    matches!(
        letter,
        'ĉ' | 'ĝ' | 'ĥ' | 'ĵ' | 'ŝ' | 'ŭ' | 'Ĉ' | 'Ĝ' | 'Ĥ' | 'Ĵ' | 'Ŝ' | 'Ŭ'
    )
}

/// Перевод в x-нотацию ("ŝajnas" -> "sxajnas").
/// Преобразование тотально: буквы без диакритики проходят как есть.
pub fn x_notation(word: &str) -> String {
    let mut notated = String::with_capacity(word.len());
    for letter in word.chars() {
        match letter {
            'ĉ' => notated.push_str("cx"),
            'ĝ' => notated.push_str("gx"),
            'ĥ' => notated.push_str("hx"),
            'ĵ' => notated.push_str("jx"),
            'ŝ' => notated.push_str("sx"),
            'ŭ' => notated.push_str("ux"),
            _ => notated.push(letter),
        }
    }
    notated
}

/// Обратный перевод x-диграфов в диакритические буквы ("sxajnas" -> "ŝajnas").
pub fn hat_notation(word: &str) -> String {
    let mut hatted = String::with_capacity(word.len());
    let mut letters = word.chars().peekable();
    while let Some(letter) = letters.next() {
        if letters.peek() == Some(&'x') {
            let hat = match letter {
                'c' => Some('ĉ'),
                'g' => Some('ĝ'),
                'h' => Some('ĥ'),
                'j' => Some('ĵ'),
                's' => Some('ŝ'),
                'u' => Some('ŭ'),
                _ => None,
            };
            if let Some(hat) = hat {
                hatted.push(hat);
                letters.next();
                continue;
            }
        }
        hatted.push(letter);
    }
    hatted
}

/// Восстановление исходного написания: идем по исходному слову параллельно
/// с x-нотированным решением, возвращая буквы источника и перенося апострофы.
/// Решение обязано быть x-нотацией приведенного к нижнему регистру слова.
pub fn restore(solution: &str, word: &str) -> String {
    let solution: Vec<char> = solution.chars().collect();
    let mut restored = String::with_capacity(word.len() + solution.len());

    let mut i = 0;
    for letter in word.chars() {
        restored.push(letter);

        if is_hat_letter(letter) {
            i += 1;
        }

        if solution.len() > i + 1 && solution[i + 1] == '\'' {
            restored.push('\'');
            i += 1;
        }

        i += 1;
    }

    restored
}
