use crate::e2e::helpers;

use futures::{SinkExt, StreamExt};
use helpers::{spawn_app, TEST_TOKEN};
use hyper::StatusCode;
use pretty_assertions::assert_eq;
use speech_gateway::domain::synthesis::build_ssml;
use speech_gateway::infrastructure::repositories::{
    ConversionError, ConversionRepository, EdgeConversionRepository,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tokio_tungstenite::{accept_async, tungstenite::protocol::Message};

/// How the fake backend answers once it has the config and SSML messages
enum Behaviour {
    Speak(Vec<Vec<u8>>),
    CloseEarly,
    Silent,
}

fn audio_frame(path: &str, payload: &[u8]) -> Vec<u8> {
    let headers = format!(
        "X-RequestId:fake\r\nContent-Type:audio/mpeg\r\nX-StreamId:1\r\nPath:{}\r\n",
        path
    );
    let mut frame = (headers.len() as u16).to_be_bytes().to_vec();
    frame.extend_from_slice(headers.as_bytes());
    frame.extend_from_slice(payload);
    frame
}

fn text_message(path: &str) -> Message {
    Message::Text(format!(
        "X-RequestId:fake\r\nContent-Type:application/json; charset=utf-8\r\nPath:{}\r\n\r\n{{}}",
        path
    ))
}

/// Serve a single Edge read-aloud session. The join handle yields the text
/// messages the client sent.
async fn spawn_fake_edge(behaviour: Behaviour) -> (String, JoinHandle<Vec<String>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let mut ws = accept_async(stream).await.unwrap();

        let mut received = Vec::new();
        while received.len() < 2 {
            match ws.next().await {
                Some(Ok(Message::Text(text))) => received.push(text),
                Some(Ok(_)) => {}
                _ => return received,
            }
        }

        match behaviour {
            Behaviour::Speak(chunks) => {
                ws.send(text_message("turn.start")).await.unwrap();
                ws.send(Message::Binary(audio_frame("audio.metadata", b"{}")))
                    .await
                    .unwrap();
                for chunk in chunks {
                    ws.send(Message::Binary(audio_frame("audio", &chunk)))
                        .await
                        .unwrap();
                }
                ws.send(text_message("turn.end")).await.unwrap();
            }
            Behaviour::CloseEarly => {
                ws.send(Message::Binary(audio_frame("audio", &[1, 2])))
                    .await
                    .unwrap();
                let _ = ws.close(None).await;
            }
            Behaviour::Silent => {
                ws.send(text_message("turn.end")).await.unwrap();
            }
        }

        // Wait for the client to hang up
        while let Some(Ok(_)) = ws.next().await {}
        received
    });

    let url = format!(
        "ws://{}/consumer/speech/synthesize/readaloud/edge/v1?TrustedClientToken=test",
        addr
    );
    (url, handle)
}

#[tokio::test]
async fn it_should_collect_audio_until_turn_end() {
    let (url, server) =
        spawn_fake_edge(Behaviour::Speak(vec![vec![0xFF, 0xFB], vec![0x90, 0x00, 0x01]])).await;
    let repo = EdgeConversionRepository::new(url);
    let ssml = build_ssml("hello", "zh-CN-XiaoxiaoNeural", "0.00");

    let audio = repo
        .convert(&ssml, "audio-24khz-48kbitrate-mono-mp3")
        .await
        .unwrap();

    assert_eq!(audio, vec![0xFF, 0xFB, 0x90, 0x00, 0x01]);

    let received = server.await.unwrap();
    assert_eq!(received.len(), 2);
    assert!(received[0].contains("Path:speech.config\r\n"));
    assert!(received[0].contains(r#""outputFormat":"audio-24khz-48kbitrate-mono-mp3""#));
    assert!(received[1].contains("Path:ssml\r\n"));
    assert!(received[1].contains("Content-Type:application/ssml+xml"));
    assert!(received[1].ends_with(&format!("\r\n\r\n{}", ssml)));
}

#[tokio::test]
async fn it_should_fail_when_backend_closes_early() {
    let (url, server) = spawn_fake_edge(Behaviour::CloseEarly).await;
    let repo = EdgeConversionRepository::new(url);

    let err = repo
        .convert("<speak/>", "audio-24khz-48kbitrate-mono-mp3")
        .await
        .unwrap_err();

    assert!(matches!(err, ConversionError::ClosedEarly), "got {err}");
    server.await.unwrap();
}

#[tokio::test]
async fn it_should_fail_when_backend_sends_no_audio() {
    let (url, server) = spawn_fake_edge(Behaviour::Silent).await;
    let repo = EdgeConversionRepository::new(url);

    let err = repo
        .convert("<speak/>", "audio-24khz-48kbitrate-mono-mp3")
        .await
        .unwrap_err();

    assert!(matches!(err, ConversionError::EmptyAudio), "got {err}");
    server.await.unwrap();
}

#[tokio::test]
async fn it_should_fail_when_backend_is_unreachable() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let repo = EdgeConversionRepository::new(format!("ws://{}/edge/v1", addr));
    let err = repo
        .convert("<speak/>", "audio-24khz-48kbitrate-mono-mp3")
        .await
        .unwrap_err();

    assert!(matches!(err, ConversionError::Connect(_)), "got {err}");
}

#[tokio::test]
async fn it_should_serve_audio_from_edge_backend_end_to_end() {
    let (url, server) = spawn_fake_edge(Behaviour::Speak(vec![b"OggS".to_vec()])).await;
    let repo = Arc::new(EdgeConversionRepository::new(url));
    let (client, _config) = spawn_app(repo).await;

    let response = client
        .get(&format!(
            "/?text=hi&token={}&format=ogg-24khz-16bit-mono-opus",
            TEST_TOKEN
        ))
        .await
        .unwrap();

    response
        .assert_status(StatusCode::OK)
        .assert_header("content-type", "audio/ogg; codecs=opus; rate=24000");
    assert_eq!(response.body_bytes, b"OggS".to_vec());

    let received = server.await.unwrap();
    assert!(received[0].contains(r#""outputFormat":"ogg-24khz-16bit-mono-opus""#));
    assert!(received[1].contains(r#"<prosody rate="0.00%">hi</prosody>"#));
}
