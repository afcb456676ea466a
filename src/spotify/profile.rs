use futures::future::try_join_all;

use crate::{
    Res,
    spotify::SpotifyClient,
    types::{Artist, AudioFeatures, AudioFeaturesResponse, Page, Track, UserProfile},
};

/// Maximum ids accepted by the audio-features endpoint.
const AUDIO_FEATURES_BATCH: usize = 100;

impl SpotifyClient {
    pub async fn current_user(&self) -> Res<UserProfile> {
        self.send(self.get("me")).await
    }

    pub async fn top_artists(&self) -> Res<Vec<Artist>> {
        let page: Page<Artist> = self.send(self.get("me/top/artists")).await?;
        Ok(page.items)
    }

    pub async fn top_tracks(&self) -> Res<Vec<Track>> {
        let page: Page<Track> = self.send(self.get("me/top/tracks")).await?;
        Ok(page.items)
    }

    /// Audio features for the given track ids, one entry per id in request
    /// order. Tracks the API cannot analyze come back as `None`.
    pub async fn audio_features(&self, track_ids: &[String]) -> Res<Vec<Option<AudioFeatures>>> {
        let batches = track_ids.chunks(AUDIO_FEATURES_BATCH).map(|chunk| async move {
            let res: AudioFeaturesResponse = self
                .send(self.get("audio-features").query(&[("ids", chunk.join(","))]))
                .await?;
            Ok::<_, crate::Error>(res.audio_features)
        });

        Ok(try_join_all(batches).await?.into_iter().flatten().collect())
    }
}
