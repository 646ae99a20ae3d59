//! Remote service contract

use async_trait::async_trait;
use fleet_api::models::{
    GetDeviceActionStatusRequest, GetDeviceActionStatusResponse, GetDeviceInfoRequest,
    GetDeviceInfoResponse, InitiateDeviceActionRequest, InitiateDeviceActionResponse,
    ListDevicesRequest, ListDevicesResponse, RegisterDeviceRequest, RegisterDeviceResponse,
    SetDeviceStatusRequest, SetDeviceStatusResponse,
};

use crate::errors::TransportError;

/// The six operations exposed by the fleet management service
///
/// A response with `success == false` is a normal outcome carried in `Ok`;
/// `Err` is reserved for faults of the transport itself.
#[async_trait]
pub trait DeviceService: Send + Sync {
    async fn register_device(
        &self,
        request: RegisterDeviceRequest,
    ) -> Result<RegisterDeviceResponse, TransportError>;

    async fn set_device_status(
        &self,
        request: SetDeviceStatusRequest,
    ) -> Result<SetDeviceStatusResponse, TransportError>;

    async fn get_device_info(
        &self,
        request: GetDeviceInfoRequest,
    ) -> Result<GetDeviceInfoResponse, TransportError>;

    async fn list_devices(
        &self,
        request: ListDevicesRequest,
    ) -> Result<ListDevicesResponse, TransportError>;

    async fn initiate_device_action(
        &self,
        request: InitiateDeviceActionRequest,
    ) -> Result<InitiateDeviceActionResponse, TransportError>;

    async fn get_device_action_status(
        &self,
        request: GetDeviceActionStatusRequest,
    ) -> Result<GetDeviceActionStatusResponse, TransportError>;
}
