/// Орфография эсперанто: диакритика и x-нотация.
pub mod orthography;
/// Двухуровневая типизация морфем:
/// мелкозернистые теги марковской модели и грубые классы правил.
pub mod tags;

#[macro_export]
/// Быстрая сборка последовательности тегов, используется в тестах.
macro_rules! tags {
    ($($tag:expr),* $(,)?) => {
        $crate::TagSeq::from_slice(&[$($tag),*])
    };
}
