use crate::{
    Res,
    spotify::SpotifyClient,
    types::{
        AddTrackToPlaylistRequest, AddTrackToPlaylistResponse, CreatePlaylistRequest,
        CreatePlaylistResponse, Page, PlaylistItem, PlaylistSummary, SearchPlaylistsResponse,
    },
};

/// Upper bound on followed `next` links when listing the user's playlists.
const MAX_PLAYLIST_PAGES: usize = 20;

impl SpotifyClient {
    /// All playlists of the current user, following paging links.
    pub async fn user_playlists(&self) -> Res<Vec<PlaylistSummary>> {
        let mut page: Page<PlaylistSummary> = self
            .send(self.get("me/playlists").query(&[("limit", "50")]))
            .await?;
        let mut playlists = std::mem::take(&mut page.items);
        let mut pages = 1;

        while let Some(next) = page.next.take() {
            if pages >= MAX_PLAYLIST_PAGES {
                break;
            }
            page = self.send(self.get_absolute(&next)).await?;
            playlists.append(&mut page.items);
            pages += 1;
        }

        Ok(playlists)
    }

    pub async fn get_playlist_tracks(&self, playlist_id: &str) -> Res<Vec<PlaylistItem>> {
        let page: Page<PlaylistItem> = self
            .send(self.get(&format!("playlists/{}/tracks", playlist_id)))
            .await?;
        Ok(page.items)
    }

    /// Public playlists for a free-text query; null entries are dropped.
    pub async fn search_public_playlists(
        &self,
        query: &str,
        limit: u32,
    ) -> Res<Vec<PlaylistSummary>> {
        let res: SearchPlaylistsResponse = self
            .send(self.get("search").query(&[
                ("q", query.to_string()),
                ("type", "playlist".to_string()),
                ("limit", limit.to_string()),
            ]))
            .await?;

        Ok(res.playlists.items.into_iter().flatten().collect())
    }

    pub async fn create_playlist(
        &self,
        user_id: &str,
        request: &CreatePlaylistRequest,
    ) -> Res<CreatePlaylistResponse> {
        self.send(self.post(&format!("users/{}/playlists", user_id)).json(request))
            .await
    }

    pub async fn add_tracks(
        &self,
        playlist_id: &str,
        uris: &[String],
    ) -> Res<AddTrackToPlaylistResponse> {
        let body = AddTrackToPlaylistRequest {
            uris: uris.to_vec(),
        };
        self.send(
            self.post(&format!("playlists/{}/tracks", playlist_id))
                .json(&body),
        )
        .await
    }
}
