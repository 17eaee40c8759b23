/// Build the SSML document sent to the speech backend.
///
/// `rate` is a signed percentage offset without the `%` sign (e.g. `"0.00"`,
/// `"-20"`). All three values are interpolated verbatim: markup inside `text`
/// reaches the backend as markup.
pub fn build_ssml(text: &str, voice_name: &str, rate: &str) -> String {
    format!(
        concat!(
            r#"<speak xmlns="http://www.w3.org/2001/10/synthesis" "#,
            r#"xmlns:mstts="http://www.w3.org/2001/mstts" "#,
            r#"xmlns:emo="http://www.w3.org/2009/10/emotionml" "#,
            r#"version="1.0" xml:lang="zh-CN">"#,
            r#"<voice name="{voice_name}"><prosody rate="{rate}%">{text}</prosody></voice>"#,
            r#"</speak>"#,
        ),
        voice_name = voice_name,
        rate = rate,
        text = text,
    )
}
